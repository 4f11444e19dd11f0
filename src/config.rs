use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use crate::retrieval::{DownloaderStrategy, LibraryStrategy, TranscriptStrategy, YoutubeCaptions, YtDlp};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    /// Caption lookup through the ytranscript library, with language fallback.
    Library,
    /// Auto-generated subtitles downloaded by yt-dlp.
    Downloader,
}

/// Serve video transcripts over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "TRANSCRIPT_BIND", default_value = "0.0.0.0:9000")]
    pub bind: SocketAddr,

    /// How transcripts are retrieved
    #[arg(long, env = "TRANSCRIPT_STRATEGY", value_enum, default_value_t = StrategyKind::Library)]
    pub strategy: StrategyKind,

    /// Caption languages tried in order (library strategy)
    #[arg(long, env = "TRANSCRIPT_LANGUAGES", value_delimiter = ',', default_value = "en,hi")]
    pub languages: Vec<String>,

    /// yt-dlp executable (downloader strategy)
    #[arg(long, env = "TRANSCRIPT_YTDLP_BIN", default_value = "yt-dlp")]
    pub ytdlp_bin: PathBuf,

    /// Subtitle language requested from yt-dlp (downloader strategy)
    #[arg(long, env = "TRANSCRIPT_SUBTITLE_LANG", default_value = "en")]
    pub subtitle_lang: String,

    /// Directory for per-request scratch space; defaults to the system temp dir
    #[arg(long, env = "TRANSCRIPT_TEMP_ROOT")]
    pub temp_root: Option<PathBuf>,
}

impl Config {
    pub fn build_strategy(&self) -> Arc<dyn TranscriptStrategy> {
        match self.strategy {
            StrategyKind::Library => {
                let languages = self
                    .languages
                    .iter()
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty())
                    .collect();
                Arc::new(LibraryStrategy::new(YoutubeCaptions, languages))
            }
            StrategyKind::Downloader => {
                let strategy =
                    DownloaderStrategy::new(YtDlp::new(&self.ytdlp_bin), self.subtitle_lang.clone());
                match &self.temp_root {
                    Some(root) => Arc::new(strategy.with_temp_root(root)),
                    None => Arc::new(strategy),
                }
            }
        }
    }
}
