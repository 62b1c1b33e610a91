use async_trait::async_trait;

use super::types::ChatRequest;
use crate::errors::PipelineError;

/// Abstraction over the language-model service used for both chat
/// completions and embeddings.
///
/// The same provider instance (and therefore the same embedding model) must
/// serve the ingest and query paths; similarity scores between vectors from
/// different models are meaningless.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// return the provider name (e.g. "ollama")
    fn name(&self) -> &str;

    /// check if the provider is healthy/reachable
    async fn health_check(&self) -> Result<bool, PipelineError>;

    /// chat completion (non-streaming, single shot)
    async fn chat(&self, request: ChatRequest, model_id: &str) -> Result<String, PipelineError>;

    /// generate embeddings, order-preserving and one-to-one with `inputs`
    async fn embed(
        &self,
        inputs: &[String],
        model_id: &str,
    ) -> Result<Vec<Vec<f32>>, PipelineError>;
}
