use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{health, knowledge};
use crate::state::AppState;

/// Creates the application router: the two knowledge endpoints, a health
/// check, CORS for the browser chat client, and request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health::health))
        .route("/ask", post(knowledge::ask))
        .route("/ingest", post(knowledge::ingest))
        .with_state(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}
