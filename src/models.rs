use serde::{Deserialize, Serialize};

use crate::error::TranscriptError;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRequest {
    #[serde(default)]
    pub video_id: Option<String>,
}

impl TranscriptRequest {
    /// The video id as sent, or `None` when it is absent or blank.
    pub fn video_id(&self) -> Option<&str> {
        self.video_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}

/// Response body for every `/transcript` call.
///
/// Serializes as `{"success": true, "transcript": ...}` or
/// `{"success": false, "error": ...}`; the two optional fields are never both set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl Envelope {
    pub fn ok(transcript: impl Into<String>) -> Self {
        Self {
            success: true,
            transcript: Some(transcript.into()),
            error: None,
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            transcript: None,
            error: Some(error.into()),
        }
    }
}

impl From<Result<String, TranscriptError>> for Envelope {
    fn from(result: Result<String, TranscriptError>) -> Self {
        match result {
            Ok(transcript) => Envelope::ok(transcript),
            Err(e) => Envelope::err(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_envelope_shapes() {
        let ok = serde_json::to_value(Envelope::ok("Hello there world")).unwrap();
        assert_eq!(ok, json!({ "success": true, "transcript": "Hello there world" }));

        let err = serde_json::to_value(Envelope::from(Err::<String, _>(
            TranscriptError::ToolFailed("ERROR: Video unavailable".into()),
        )))
        .unwrap();
        assert_eq!(err, json!({ "success": false, "error": "ERROR: Video unavailable" }));
    }

    #[test]
    fn test_empty_transcript_still_serializes_field() {
        let ok = serde_json::to_value(Envelope::ok("")).unwrap();
        assert_eq!(ok, json!({ "success": true, "transcript": "" }));
    }

    #[test]
    fn test_request_video_id_presence() {
        let req: TranscriptRequest = serde_json::from_value(json!({ "videoId": " abc123 " })).unwrap();
        assert_eq!(req.video_id(), Some(" abc123 "));

        let req: TranscriptRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.video_id(), None);

        let req: TranscriptRequest = serde_json::from_value(json!({ "videoId": null })).unwrap();
        assert_eq!(req.video_id(), None);

        let req: TranscriptRequest = serde_json::from_value(json!({ "videoId": "   " })).unwrap();
        assert_eq!(req.video_id(), None);
    }
}
