pub mod downloader;
pub mod library;

use futures::future::BoxFuture;

use crate::error::TranscriptError;

pub use downloader::{DownloaderStrategy, YtDlp};
pub use library::{LibraryStrategy, YoutubeCaptions};

/// A way of turning a video id into a transcript.
///
/// The router only sees this trait; which implementation backs it is decided
/// once at startup.
pub trait TranscriptStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn fetch<'a>(&'a self, video_id: &'a str) -> BoxFuture<'a, Result<String, TranscriptError>>;
}
