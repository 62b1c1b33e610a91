use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Closed set of failure kinds for the ingestion and answer pipelines.
///
/// Transport failures carry the underlying error text so the HTTP boundary
/// can surface a useful detail without callers matching on strings.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to fetch {url}: {reason}")]
    FetchFailed { url: String, reason: String },
    #[error("embedding request failed: {0}")]
    EmbedFailed(String),
    #[error("vector store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("language model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("knowledge base is empty")]
    EmptyKnowledgeBase,
    #[error("embedding model mismatch: collection expects {expected} dimensions, got {actual}")]
    ModelMismatch { expected: usize, actual: usize },
}

/// HTTP-facing error returned by handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("upstream failure: {0}")]
    BadGateway(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::FetchFailed { .. }
            | PipelineError::StoreUnavailable(_)
            | PipelineError::ModelUnavailable(_)
            | PipelineError::EmbedFailed(_) => ApiError::BadGateway(err.to_string()),
            PipelineError::ModelMismatch { .. } => ApiError::Internal(err.to_string()),
            // The answer pipeline converts this into its fallback answer;
            // reaching here means a caller skipped that path.
            PipelineError::EmptyKnowledgeBase => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({ "detail": message }));
        (status, body).into_response()
    }
}
