use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Json, State},
    routing::post,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::{
    error::TranscriptError,
    models::{Envelope, TranscriptRequest},
    retrieval::TranscriptStrategy,
};

#[derive(Clone)]
pub struct AppState {
    pub strategy: Arc<dyn TranscriptStrategy>,
}

pub fn create_routes(strategy: Arc<dyn TranscriptStrategy>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/transcript", post(get_transcript))
        .layer(cors)
        .with_state(AppState { strategy })
}

// Always answers 200; failures travel inside the envelope. The body is read as
// JSON whatever its Content-Type says.
async fn get_transcript(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<Envelope> {
    let request = match parse_request(body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "rejected transcript request body");
            return Json(Envelope::err(e.to_string()));
        }
    };

    let Some(video_id) = request.video_id() else {
        warn!("transcript request without videoId");
        return Json(Envelope::err(TranscriptError::MissingVideoId.to_string()));
    };

    let result = fetch_isolated(Arc::clone(&state.strategy), video_id.to_string()).await;
    match &result {
        Ok(transcript) => info!(video_id, strategy = state.strategy.name(), chars = transcript.len(), "transcript served"),
        Err(e) => warn!(video_id, strategy = state.strategy.name(), error = %e, "transcript unavailable"),
    }

    Json(Envelope::from(result))
}

fn parse_request(body: Result<Bytes, BytesRejection>) -> Result<TranscriptRequest, TranscriptError> {
    let bytes = body.map_err(|rejection| TranscriptError::InvalidRequest(rejection.body_text()))?;
    serde_json::from_slice(&bytes).map_err(|e| TranscriptError::InvalidRequest(e.to_string()))
}

// Runs the strategy on its own task so a panic inside it still yields an envelope.
async fn fetch_isolated(
    strategy: Arc<dyn TranscriptStrategy>,
    video_id: String,
) -> Result<String, TranscriptError> {
    match tokio::spawn(async move { strategy.fetch(&video_id).await }).await {
        Ok(result) => result,
        Err(join_error) => {
            error!(error = %join_error, "transcript task failed");
            Err(TranscriptError::Unexpected(join_error.to_string()))
        }
    }
}
