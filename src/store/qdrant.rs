use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use super::{Passage, ScoredPassage, VectorStore};
use crate::errors::PipelineError;

/// Qdrant gateway speaking the REST API.
#[derive(Clone)]
pub struct QdrantStore {
    base_url: String,
    client: Client,
    /// Tag written into every point's payload so a later model change is
    /// detectable instead of silently degrading retrieval.
    embedding_model: String,
}

impl QdrantStore {
    pub fn new(base_url: String, embedding_model: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            embedding_model,
        }
    }

    fn collection_url(&self, name: &str) -> String {
        format!("{}/collections/{}", self.base_url, name)
    }

    /// Fetches collection info; `Ok(None)` when the collection is missing.
    async fn collection_info(&self, name: &str) -> Result<Option<Value>, PipelineError> {
        let res = self
            .client
            .get(self.collection_url(name))
            .send()
            .await
            .map_err(|e| PipelineError::StoreUnavailable(e.to_string()))?;

        match res.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let payload: Value = res
                    .json()
                    .await
                    .map_err(|e| PipelineError::StoreUnavailable(e.to_string()))?;
                Ok(Some(payload["result"].clone()))
            }
            status => {
                let text = res.text().await.unwrap_or_default();
                Err(PipelineError::StoreUnavailable(format!(
                    "collection lookup failed ({}): {}",
                    status, text
                )))
            }
        }
    }

    async fn create_collection(&self, name: &str, dim: usize) -> Result<(), PipelineError> {
        let body = json!({
            "vectors": { "size": dim, "distance": "Cosine" }
        });
        let res = self
            .client
            .put(self.collection_url(name))
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::StoreUnavailable(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::StoreUnavailable(format!(
                "collection create failed ({}): {}",
                status, text
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn collection_exists(&self, name: &str) -> Result<bool, PipelineError> {
        Ok(self.collection_info(name).await?.is_some())
    }

    async fn collection_size(&self, name: &str) -> Result<u64, PipelineError> {
        match self.collection_info(name).await? {
            Some(info) => Ok(info["points_count"].as_u64().unwrap_or(0)),
            None => Ok(0),
        }
    }

    async fn upsert(&self, name: &str, passages: Vec<Passage>) -> Result<(), PipelineError> {
        let Some(dim) = passages.first().map(|p| p.vector.len()) else {
            return Ok(());
        };

        match self.collection_info(name).await? {
            None => self.create_collection(name, dim).await?,
            Some(info) => {
                let existing = info["config"]["params"]["vectors"]["size"]
                    .as_u64()
                    .unwrap_or(0) as usize;
                if existing != 0 && existing != dim {
                    return Err(PipelineError::ModelMismatch {
                        expected: existing,
                        actual: dim,
                    });
                }
            }
        }

        let points: Vec<Value> = passages
            .iter()
            .map(|p| {
                json!({
                    "id": Uuid::new_v4().to_string(),
                    "vector": p.vector,
                    "payload": {
                        "text": p.text,
                        "source": p.source,
                        "embedding_model": self.embedding_model,
                    }
                })
            })
            .collect();

        let url = format!("{}/points?wait=true", self.collection_url(name));
        let res = self
            .client
            .put(&url)
            .json(&json!({ "points": points }))
            .send()
            .await
            .map_err(|e| PipelineError::StoreUnavailable(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::StoreUnavailable(format!(
                "upsert failed ({}): {}",
                status, text
            )));
        }
        Ok(())
    }

    async fn delete_by_source(&self, name: &str, source: &str) -> Result<(), PipelineError> {
        let url = format!("{}/points/delete?wait=true", self.collection_url(name));
        let body = json!({
            "filter": {
                "must": [{ "key": "source", "match": { "value": source } }]
            }
        });
        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::StoreUnavailable(e.to_string()))?;

        // Nothing stored for this source yet.
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::StoreUnavailable(format!(
                "delete by source failed ({}): {}",
                status, text
            )));
        }
        Ok(())
    }

    async fn query(
        &self,
        name: &str,
        vector: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredPassage>, PipelineError> {
        let url = format!("{}/points/search", self.collection_url(name));
        let body = json!({
            "vector": vector,
            "limit": k,
            "with_payload": true,
        });
        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::StoreUnavailable(e.to_string()))?;

        if res.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::StoreUnavailable(format!(
                "search failed ({}): {}",
                status, text
            )));
        }

        let payload: Value = res
            .json()
            .await
            .map_err(|e| PipelineError::StoreUnavailable(e.to_string()))?;

        let mut hits = Vec::new();
        if let Some(results) = payload["result"].as_array() {
            for hit in results {
                let point = &hit["payload"];
                if let Some(model) = point["embedding_model"].as_str() {
                    if model != self.embedding_model {
                        tracing::warn!(
                            "passage embedded with '{}' but querying with '{}'",
                            model,
                            self.embedding_model
                        );
                    }
                }
                hits.push(ScoredPassage {
                    text: point["text"].as_str().unwrap_or_default().to_string(),
                    source: point["source"].as_str().unwrap_or_default().to_string(),
                    score: hit["score"].as_f64().unwrap_or(0.0) as f32,
                });
            }
        }

        Ok(hits)
    }
}
