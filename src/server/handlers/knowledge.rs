use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub url: String,
}

pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.question.trim().is_empty() {
        return Err(ApiError::BadRequest("question must not be empty".to_string()));
    }

    let answer = state.answer.ask(&request.question).await.map_err(|err| {
        tracing::error!("RAG error: {}", err);
        ApiError::from(err)
    })?;

    Ok(Json(answer))
}

pub async fn ingest(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IngestRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.url.trim().is_empty() {
        return Err(ApiError::BadRequest("url must not be empty".to_string()));
    }

    state.ingest.ingest(&request.url).await.map_err(|err| {
        tracing::error!("ingestion error: {}", err);
        ApiError::from(err)
    })?;

    Ok(Json(json!({ "message": "Ingestion successful" })))
}
