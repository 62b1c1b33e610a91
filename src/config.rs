use std::env;
use std::path::PathBuf;

/// Process configuration, read once from the environment at startup.
///
/// Every value has a working default so the service comes up in a bare
/// docker-compose network without any configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Qdrant HTTP API.
    pub qdrant_url: String,
    /// Base URL of the Ollama HTTP API.
    pub ollama_url: String,
    /// Model used for chat completions.
    pub chat_model: String,
    /// Model used for embeddings at both ingest and query time.
    pub embedding_model: String,
    /// Name of the Qdrant collection holding all passages.
    pub collection_name: String,
    /// Path to the JSON file with the startup seed URLs.
    pub seed_urls_path: PathBuf,
    /// Port to bind the HTTP server on.
    pub port: u16,
    /// Optional directory for rolling log files.
    pub log_dir: Option<PathBuf>,
    /// Chunk size in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters.
    pub chunk_overlap: usize,
    /// Number of passages retrieved per question.
    pub top_k: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            qdrant_url: "http://localhost:6333".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            chat_model: "llama3".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            collection_name: "pittsburgh_knowledge".to_string(),
            seed_urls_path: PathBuf::from("seed_urls.json"),
            port: 8000,
            log_dir: None,
            chunk_size: 1000,
            chunk_overlap: 100,
            top_k: 3,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            qdrant_url: env_or("QDRANT_URL", defaults.qdrant_url),
            ollama_url: env_or("OLLAMA_BASE_URL", defaults.ollama_url),
            chat_model: env_or("CHAT_MODEL", defaults.chat_model),
            embedding_model: env_or("EMBEDDING_MODEL", defaults.embedding_model),
            collection_name: env_or("COLLECTION_NAME", defaults.collection_name),
            seed_urls_path: env::var("SEED_URLS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.seed_urls_path),
            port: env::var("PORT")
                .ok()
                .and_then(|val| val.parse::<u16>().ok())
                .unwrap_or(defaults.port),
            log_dir: env::var("LOG_DIR").ok().map(PathBuf::from),
            chunk_size: defaults.chunk_size,
            chunk_overlap: defaults.chunk_overlap,
            top_k: defaults.top_k,
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => val,
        _ => default,
    }
}
