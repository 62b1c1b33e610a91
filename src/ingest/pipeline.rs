use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::PipelineError;
use crate::ingest::chunker;
use crate::ingest::fetch::ContentFetcher;
use crate::llm::LlmProvider;
use crate::store::{Passage, VectorStore};

/// Ingestion pipeline: fetch → chunk → embed → upsert.
///
/// Each step is a hard dependency on the previous one succeeding; a
/// failure anywhere fails the whole URL. Re-ingesting a URL replaces its
/// previously stored passages.
#[derive(Clone)]
pub struct IngestPipeline {
    fetcher: ContentFetcher,
    llm: Arc<dyn LlmProvider>,
    store: Arc<dyn VectorStore>,
    collection: String,
    embedding_model: String,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl IngestPipeline {
    pub fn new(
        config: &AppConfig,
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            fetcher: ContentFetcher::new(),
            llm,
            store,
            collection: config.collection_name.clone(),
            embedding_model: config.embedding_model.clone(),
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
        }
    }

    /// Ingests one URL and returns the number of passages stored.
    ///
    /// A page with no visible text is a no-op success, not an error.
    pub async fn ingest(&self, url: &str) -> Result<usize, PipelineError> {
        let text = self.fetcher.fetch(url).await?;

        let chunks = chunker::split(&text, self.chunk_size, self.chunk_overlap);
        if chunks.is_empty() {
            tracing::info!("{} produced no text, nothing to ingest", url);
            return Ok(0);
        }

        let vectors = self.llm.embed(&chunks, &self.embedding_model).await?;

        let passages: Vec<Passage> = chunks
            .into_iter()
            .zip(vectors)
            .map(|(text, vector)| Passage {
                text,
                source: url.to_string(),
                vector,
            })
            .collect();
        let count = passages.len();

        // Replace rather than accumulate on re-ingestion.
        self.store.delete_by_source(&self.collection, url).await?;
        self.store.upsert(&self.collection, passages).await?;

        tracing::info!("ingested {} passages from {}", count, url);
        Ok(count)
    }
}
