use thiserror::Error;

/// Message returned when the downloader exits cleanly but leaves no subtitle file.
pub const SUBTITLE_FILE_MISSING: &str =
    "Subtitle file not found. Captions may be unavailable or the video may be private.";

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Missing videoId in request body")]
    MissingVideoId,

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    /// The requested caption language does not exist for this video.
    /// This is the only lookup failure that moves on to the next language.
    #[error("{message}")]
    LanguageUnavailable { language: String, message: String },

    #[error("{0}")]
    Lookup(String),

    #[error("{0}")]
    ToolFailed(String),

    #[error("{}", SUBTITLE_FILE_MISSING)]
    SubtitleFileMissing,

    #[error("Unexpected error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_messages_pass_through() {
        let err = TranscriptError::ToolFailed("ERROR: Video unavailable".into());
        assert_eq!(err.to_string(), "ERROR: Video unavailable");

        let err = TranscriptError::LanguageUnavailable {
            language: "en".into(),
            message: "No transcripts are available in en".into(),
        };
        assert_eq!(err.to_string(), "No transcripts are available in en");
    }

    #[test]
    fn test_unexpected_errors_are_prefixed() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(TranscriptError::from(io).to_string(), "Unexpected error: denied");
        assert_eq!(
            TranscriptError::Unexpected("task 3 panicked".into()).to_string(),
            "Unexpected error: task 3 panicked"
        );
    }
}
