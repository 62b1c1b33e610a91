//! VectorStore trait — abstract interface for the passage store.
//!
//! The primary implementation is `QdrantStore` in the `qdrant` module.

pub mod qdrant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::PipelineError;

pub use qdrant::QdrantStore;

/// A passage of source text together with its embedding vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    /// The text content of the chunk.
    pub text: String,
    /// URL the text was scraped from.
    pub source: String,
    /// Embedding vector, produced by the configured embedding model.
    pub vector: Vec<f32>,
}

/// Result of a similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPassage {
    pub text: String,
    pub source: String,
    /// Similarity score (higher = better).
    pub score: f32,
}

/// Abstract interface over the vector database.
///
/// Missing collections are not errors: `collection_size` reports 0 and
/// `query` returns no hits, so callers can tell "no knowledge yet" apart
/// from a transport failure.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn collection_exists(&self, name: &str) -> Result<bool, PipelineError>;

    /// Number of stored points; 0 if the collection is missing or empty.
    async fn collection_size(&self, name: &str) -> Result<u64, PipelineError>;

    /// Insert passages, creating the collection on first use.
    ///
    /// Fails with `ModelMismatch` when the collection's vector size does
    /// not match the batch's dimensionality.
    async fn upsert(&self, name: &str, passages: Vec<Passage>) -> Result<(), PipelineError>;

    /// Remove every passage whose `source` payload equals `source`.
    async fn delete_by_source(&self, name: &str, source: &str) -> Result<(), PipelineError>;

    /// The `k` nearest passages to `vector` by similarity, best first.
    async fn query(
        &self,
        name: &str,
        vector: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredPassage>, PipelineError>;
}
