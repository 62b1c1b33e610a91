use std::sync::Arc;

use crate::state::AppState;

/// Startup seeding: when the collection is missing or empty, ingest the
/// seed URLs sequentially, best-effort. Never fails the process; an
/// unreachable store only logs a warning.
pub async fn run(state: Arc<AppState>) {
    let collection = &state.config.collection_name;

    let size = match state.store.collection_size(collection).await {
        Ok(size) => size,
        Err(err) => {
            tracing::warn!("startup check failed (vector store may still be booting): {}", err);
            return;
        }
    };

    if size > 0 {
        tracing::info!("knowledge base already contains {} vectors, skipping seed", size);
        return;
    }

    let path = &state.config.seed_urls_path;
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => {
            tracing::warn!("seed file {} not found, skipping seed", path.display());
            return;
        }
    };

    let urls: Vec<String> = match serde_json::from_str(&raw) {
        Ok(urls) => urls,
        Err(err) => {
            tracing::warn!("seed file {} is not a JSON array of URLs: {}", path.display(), err);
            return;
        }
    };

    tracing::info!("knowledge base empty, seeding {} URLs", urls.len());
    for url in &urls {
        match state.ingest.ingest(url).await {
            Ok(count) => tracing::info!("seeded {} passages from {}", count, url),
            Err(err) => tracing::warn!("failed to seed {}: {}", url, err),
        }
    }
    tracing::info!("foundation seeding complete");
}
