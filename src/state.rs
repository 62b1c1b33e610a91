use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::AppConfig;
use crate::ingest::IngestPipeline;
use crate::llm::{LlmProvider, OllamaProvider};
use crate::rag::AnswerPipeline;
use crate::store::{QdrantStore, VectorStore};

/// Shared application state. All external client handles are constructed
/// here once and injected into the pipelines; nothing global.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub llm: Arc<dyn LlmProvider>,
    pub store: Arc<dyn VectorStore>,
    pub ingest: IngestPipeline,
    pub answer: AnswerPipeline,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn initialize(config: AppConfig) -> Arc<Self> {
        let llm: Arc<dyn LlmProvider> = Arc::new(OllamaProvider::new(config.ollama_url.clone()));
        let store: Arc<dyn VectorStore> = Arc::new(QdrantStore::new(
            config.qdrant_url.clone(),
            config.embedding_model.clone(),
        ));
        Self::with_clients(config, llm, store)
    }

    /// Assembles state around caller-supplied clients. Tests use this to
    /// swap the real services for mocks.
    pub fn with_clients(
        config: AppConfig,
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Arc<Self> {
        let ingest = IngestPipeline::new(&config, llm.clone(), store.clone());
        let answer = AnswerPipeline::new(&config, llm.clone(), store.clone());

        Arc::new(AppState {
            config,
            llm,
            store,
            ingest,
            answer,
            started_at: Utc::now(),
        })
    }
}
