//! Transcript retrieval through the `ytranscript` captions library.

use futures::future::{BoxFuture, FutureExt};
use html_escape::decode_html_entities;
use tracing::{debug, info, warn};
use ytranscript::{TranscriptConfig, YoutubeTranscript, YoutubeTranscriptError};

use super::TranscriptStrategy;
use crate::error::TranscriptError;
use crate::transcript::{captions_to_transcript, CaptionLine};

/// Caption languages tried in order when none are configured.
pub const DEFAULT_LANGUAGES: [&str; 2] = ["en", "hi"];

/// Source of timed captions for a video in a given language.
pub trait CaptionLookup: Send + Sync {
    fn lookup<'a>(
        &'a self,
        video_id: &'a str,
        language: &'a str,
    ) -> BoxFuture<'a, Result<Vec<CaptionLine>, TranscriptError>>;
}

/// `CaptionLookup` backed by YouTube's timedtext endpoint.
#[derive(Debug, Default, Clone)]
pub struct YoutubeCaptions;

impl CaptionLookup for YoutubeCaptions {
    fn lookup<'a>(
        &'a self,
        video_id: &'a str,
        language: &'a str,
    ) -> BoxFuture<'a, Result<Vec<CaptionLine>, TranscriptError>> {
        async move {
            let config = TranscriptConfig {
                lang: Some(language.to_string()),
            };

            let entries = YoutubeTranscript::fetch_transcript(video_id, Some(config))
                .await
                .map_err(|e| classify(e, language))?;

            Ok(entries
                .into_iter()
                .map(|entry| CaptionLine::new(decode_caption(&entry.text)))
                .collect())
        }
        .boxed()
    }
}

fn classify(error: YoutubeTranscriptError, language: &str) -> TranscriptError {
    match error {
        e @ YoutubeTranscriptError::TranscriptNotAvailableLanguage(..) => {
            TranscriptError::LanguageUnavailable {
                language: language.to_string(),
                message: e.to_string(),
            }
        }
        e => TranscriptError::Lookup(e.to_string()),
    }
}

// Caption text arrives entity-encoded, often twice over (`&amp;#39;`).
fn decode_caption(text: &str) -> String {
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Looks captions up language by language; any failure moves on to the next
/// language and the last failure is reported when none succeed.
pub struct LibraryStrategy<L> {
    lookup: L,
    languages: Vec<String>,
}

impl<L: CaptionLookup> LibraryStrategy<L> {
    pub fn new(lookup: L, languages: Vec<String>) -> Self {
        let languages = if languages.is_empty() {
            DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
        } else {
            languages
        };
        Self { lookup, languages }
    }

    pub async fn fetch_captions(&self, video_id: &str) -> Result<Vec<CaptionLine>, TranscriptError> {
        let mut last_error = None;

        for language in &self.languages {
            debug!(video_id, %language, "looking up captions");
            match self.lookup.lookup(video_id, language).await {
                Ok(captions) => {
                    info!(video_id, %language, lines = captions.len(), "captions found");
                    return Ok(captions);
                }
                Err(TranscriptError::LanguageUnavailable { language, message }) => {
                    warn!(video_id, %language, error = %message, "caption language unavailable, trying next");
                    last_error = Some(TranscriptError::LanguageUnavailable { language, message });
                }
                Err(e) => {
                    warn!(video_id, %language, error = %e, "caption lookup failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| TranscriptError::Unexpected("no caption languages configured".into())))
    }
}

impl<L: CaptionLookup> TranscriptStrategy for LibraryStrategy<L> {
    fn name(&self) -> &'static str {
        "library"
    }

    fn fetch<'a>(&'a self, video_id: &'a str) -> BoxFuture<'a, Result<String, TranscriptError>> {
        async move {
            let captions = self.fetch_captions(video_id).await?;
            Ok(captions_to_transcript(&captions))
        }
        .boxed()
    }
}
