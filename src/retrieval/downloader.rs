//! Transcript retrieval by running an external subtitle downloader (`yt-dlp`)
//! and reading back the VTT file it writes.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt};
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::TranscriptStrategy;
use crate::error::TranscriptError;
use crate::transcript::subtitle_to_transcript;

pub const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
pub const SUBTITLE_FORMAT: &str = "vtt";

pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL}{video_id}")
}

/// What to download and where the tool should put it.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub language: String,
    /// Output path without extension; the tool appends `.<language>.vtt`.
    pub output_stem: PathBuf,
}

impl DownloadRequest {
    pub fn subtitle_path(&self) -> PathBuf {
        let mut name = self
            .output_stem
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.{}", self.language, SUBTITLE_FORMAT));
        self.output_stem.with_file_name(name)
    }
}

/// Captured result of one downloader run.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Diagnostic text for a failed run.
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.code {
            Some(code) => format!("subtitle downloader exited with status {code}"),
            None => "subtitle downloader was terminated by a signal".to_string(),
        }
    }
}

pub trait SubtitleTool: Send + Sync {
    fn download<'a>(&'a self, request: &'a DownloadRequest) -> BoxFuture<'a, io::Result<ToolOutput>>;
}

/// Runs the `yt-dlp` executable.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn args(request: &DownloadRequest) -> Vec<OsString> {
        let mut template = request.output_stem.as_os_str().to_os_string();
        template.push(".%(ext)s");

        vec![
            "--skip-download".into(),
            "--write-auto-sub".into(),
            "--sub-lang".into(),
            request.language.clone().into(),
            "--sub-format".into(),
            SUBTITLE_FORMAT.into(),
            "--no-progress".into(),
            "--output".into(),
            template,
            request.url.clone().into(),
        ]
    }
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

impl SubtitleTool for YtDlp {
    fn download<'a>(&'a self, request: &'a DownloadRequest) -> BoxFuture<'a, io::Result<ToolOutput>> {
        async move {
            debug!(program = %self.program.display(), url = %request.url, "running subtitle downloader");
            let output = Command::new(&self.program)
                .args(Self::args(request))
                .kill_on_drop(true)
                .output()
                .await?;

            Ok(ToolOutput {
                success: output.status.success(),
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
        .boxed()
    }
}

/// Downloads auto-generated subtitles into a throwaway directory and strips
/// them down to caption text.
pub struct DownloaderStrategy<T> {
    tool: T,
    language: String,
    temp_root: Option<PathBuf>,
}

impl<T: SubtitleTool> DownloaderStrategy<T> {
    pub fn new(tool: T, language: impl Into<String>) -> Self {
        Self {
            tool,
            language: language.into(),
            temp_root: None,
        }
    }

    /// Create per-request directories under `root` instead of the system temp dir.
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    fn scratch_dir(&self) -> io::Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("transcript-");
        match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
    }

    pub async fn fetch_transcript(&self, video_id: &str) -> Result<String, TranscriptError> {
        if video_id.trim().is_empty() {
            return Err(TranscriptError::MissingVideoId);
        }

        let scratch = self.scratch_dir()?;
        let result = self.download_into(video_id, scratch.path()).await;
        let scratch_path = scratch.path().to_path_buf();
        if let Err(e) = scratch.close() {
            warn!(path = %scratch_path.display(), error = %e, "failed to remove subtitle scratch dir");
        }
        result
    }

    async fn download_into(&self, video_id: &str, dir: &Path) -> Result<String, TranscriptError> {
        let request = DownloadRequest {
            url: watch_url(video_id),
            language: self.language.clone(),
            output_stem: dir.join(file_stem(video_id)),
        };

        let output = self.tool.download(&request).await?;
        if !output.success {
            warn!(video_id, code = ?output.code, "subtitle downloader failed");
            return Err(TranscriptError::ToolFailed(output.diagnostic()));
        }
        debug!(video_id, stdout = %output.stdout.trim(), "subtitle downloader finished");

        let subtitle_path = request.subtitle_path();
        if !is_file(&subtitle_path).await {
            warn!(video_id, path = %subtitle_path.display(), "subtitle downloader produced no file");
            return Err(TranscriptError::SubtitleFileMissing);
        }

        let content = tokio::fs::read_to_string(&subtitle_path).await?;
        let transcript = subtitle_to_transcript(&content);
        info!(video_id, chars = transcript.len(), "subtitles parsed");
        Ok(transcript)
    }
}

impl<T: SubtitleTool> TranscriptStrategy for DownloaderStrategy<T> {
    fn name(&self) -> &'static str {
        "downloader"
    }

    fn fetch<'a>(&'a self, video_id: &'a str) -> BoxFuture<'a, Result<String, TranscriptError>> {
        self.fetch_transcript(video_id).boxed()
    }
}

// Ids are opaque; keep path separators out of the output file name.
fn file_stem(video_id: &str) -> String {
    video_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
