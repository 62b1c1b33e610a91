use std::sync::Arc;

use serde::Serialize;

use crate::config::AppConfig;
use crate::errors::PipelineError;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::store::{ScoredPassage, VectorStore};

/// Returned when the collection holds no passages yet. A designed
/// fallback, not an error.
pub const EMPTY_KNOWLEDGE_BASE_ANSWER: &str =
    "The knowledge base is empty. Please ingest a URL first!";

const SYSTEM_PROMPT: &str = "You are a helpful expert assistant. Answer the question based ONLY \
on the following context. If the answer is not in the context, say \
\"I don't have that information in my database.\"";

/// A chat answer together with the deduplicated source URLs of the
/// passages that backed it.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub answer: String,
    pub sources: Vec<String>,
}

/// Answer pipeline: embed the question, retrieve top-k passages, prompt
/// the chat model with them, collect cited sources.
///
/// Each call is independent; no chat history is carried between questions.
#[derive(Clone)]
pub struct AnswerPipeline {
    llm: Arc<dyn LlmProvider>,
    store: Arc<dyn VectorStore>,
    collection: String,
    embedding_model: String,
    chat_model: String,
    top_k: usize,
}

impl AnswerPipeline {
    pub fn new(
        config: &AppConfig,
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            llm,
            store,
            collection: config.collection_name.clone(),
            embedding_model: config.embedding_model.clone(),
            chat_model: config.chat_model.clone(),
            top_k: config.top_k,
        }
    }

    pub async fn ask(&self, question: &str) -> Result<Answer, PipelineError> {
        if self.store.collection_size(&self.collection).await? == 0 {
            return Ok(Answer {
                answer: EMPTY_KNOWLEDGE_BASE_ANSWER.to_string(),
                sources: Vec::new(),
            });
        }

        let vectors = self
            .llm
            .embed(&[question.to_string()], &self.embedding_model)
            .await?;
        let query_vector = vectors
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::EmbedFailed("no embedding returned".to_string()))?;

        let hits = self
            .store
            .query(&self.collection, &query_vector, self.top_k)
            .await?;

        let request = ChatRequest::new(vec![
            ChatMessage::system(build_system_prompt(&hits)),
            ChatMessage::user(question),
        ])
        .with_temperature(0.0);

        let answer = self.llm.chat(request, &self.chat_model).await?;

        Ok(Answer {
            answer,
            sources: dedup_sources(&hits),
        })
    }
}

fn build_system_prompt(hits: &[ScoredPassage]) -> String {
    let context = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| format!("[{}] {}", i + 1, hit.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n\n<context>\n{}\n</context>", SYSTEM_PROMPT, context)
}

fn dedup_sources(hits: &[ScoredPassage]) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for hit in hits {
        if !sources.contains(&hit.source) {
            sources.push(hit.source.clone());
        }
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::store::Passage;

    struct ScriptedStore {
        size: u64,
        hits: Vec<ScoredPassage>,
    }

    #[async_trait]
    impl VectorStore for ScriptedStore {
        async fn collection_exists(&self, _name: &str) -> Result<bool, PipelineError> {
            Ok(self.size > 0)
        }

        async fn collection_size(&self, _name: &str) -> Result<u64, PipelineError> {
            Ok(self.size)
        }

        async fn upsert(&self, _name: &str, _passages: Vec<Passage>) -> Result<(), PipelineError> {
            Ok(())
        }

        async fn delete_by_source(
            &self,
            _name: &str,
            _source: &str,
        ) -> Result<(), PipelineError> {
            Ok(())
        }

        async fn query(
            &self,
            _name: &str,
            _vector: &[f32],
            k: usize,
        ) -> Result<Vec<ScoredPassage>, PipelineError> {
            Ok(self.hits.iter().take(k).cloned().collect())
        }
    }

    struct ScriptedLlm {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LlmProvider for ScriptedLlm {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn health_check(&self) -> Result<bool, PipelineError> {
            Ok(true)
        }

        async fn chat(
            &self,
            request: ChatRequest,
            _model_id: &str,
        ) -> Result<String, PipelineError> {
            self.prompts
                .lock()
                .unwrap()
                .push(request.messages[0].content.clone());
            Ok(self.reply.clone())
        }

        async fn embed(
            &self,
            inputs: &[String],
            _model_id: &str,
        ) -> Result<Vec<Vec<f32>>, PipelineError> {
            Ok(inputs.iter().map(|_| vec![0.1, 0.2, 0.3]).collect())
        }
    }

    fn hit(text: &str, source: &str, score: f32) -> ScoredPassage {
        ScoredPassage {
            text: text.to_string(),
            source: source.to_string(),
            score,
        }
    }

    fn pipeline(store: ScriptedStore, llm: ScriptedLlm) -> (AnswerPipeline, Arc<ScriptedLlm>) {
        let llm = Arc::new(llm);
        let pipeline = AnswerPipeline::new(
            &AppConfig::default(),
            llm.clone(),
            Arc::new(store),
        );
        (pipeline, llm)
    }

    #[tokio::test]
    async fn empty_collection_yields_fixed_fallback() {
        let (pipeline, _) = pipeline(
            ScriptedStore {
                size: 0,
                hits: vec![],
            },
            ScriptedLlm {
                reply: "should never be called".to_string(),
                prompts: Mutex::new(vec![]),
            },
        );

        let answer = pipeline.ask("What rivers meet in Pittsburgh?").await.unwrap();
        assert_eq!(answer.answer, EMPTY_KNOWLEDGE_BASE_ANSWER);
        assert!(answer.sources.is_empty());
    }

    #[tokio::test]
    async fn sources_are_deduplicated_and_order_preserving() {
        let (pipeline, _) = pipeline(
            ScriptedStore {
                size: 5,
                hits: vec![
                    hit("three rivers", "http://a", 0.9),
                    hit("446 bridges", "http://b", 0.8),
                    hit("steel city", "http://a", 0.7),
                ],
            },
            ScriptedLlm {
                reply: "Pittsburgh.".to_string(),
                prompts: Mutex::new(vec![]),
            },
        );

        let answer = pipeline.ask("Tell me about the city").await.unwrap();
        assert_eq!(answer.answer, "Pittsburgh.");
        assert_eq!(answer.sources, vec!["http://a", "http://b"]);
    }

    #[tokio::test]
    async fn prompt_carries_retrieved_passages_and_instruction() {
        let (pipeline, llm) = pipeline(
            ScriptedStore {
                size: 2,
                hits: vec![hit("The Fort Pitt Bridge spans the Monongahela.", "http://a", 0.9)],
            },
            ScriptedLlm {
                reply: "ok".to_string(),
                prompts: Mutex::new(vec![]),
            },
        );

        pipeline.ask("Which river does the bridge cross?").await.unwrap();

        let prompts = llm.prompts.lock().unwrap();
        let prompt = &prompts[0];
        assert!(prompt.contains("based ONLY"));
        assert!(prompt.contains("I don't have that information in my database."));
        assert!(prompt.contains("[1] The Fort Pitt Bridge spans the Monongahela."));
    }

    #[tokio::test]
    async fn store_failure_propagates_as_typed_error() {
        struct FailingStore;

        #[async_trait]
        impl VectorStore for FailingStore {
            async fn collection_exists(&self, _n: &str) -> Result<bool, PipelineError> {
                Err(PipelineError::StoreUnavailable("connection refused".into()))
            }
            async fn collection_size(&self, _n: &str) -> Result<u64, PipelineError> {
                Err(PipelineError::StoreUnavailable("connection refused".into()))
            }
            async fn upsert(&self, _n: &str, _p: Vec<Passage>) -> Result<(), PipelineError> {
                Err(PipelineError::StoreUnavailable("connection refused".into()))
            }
            async fn delete_by_source(&self, _n: &str, _s: &str) -> Result<(), PipelineError> {
                Err(PipelineError::StoreUnavailable("connection refused".into()))
            }
            async fn query(
                &self,
                _n: &str,
                _v: &[f32],
                _k: usize,
            ) -> Result<Vec<ScoredPassage>, PipelineError> {
                Err(PipelineError::StoreUnavailable("connection refused".into()))
            }
        }

        let pipeline = AnswerPipeline::new(
            &AppConfig::default(),
            Arc::new(ScriptedLlm {
                reply: "unused".to_string(),
                prompts: Mutex::new(vec![]),
            }),
            Arc::new(FailingStore),
        );

        let err = pipeline.ask("anything").await.unwrap_err();
        assert!(matches!(err, PipelineError::StoreUnavailable(_)));
    }
}
