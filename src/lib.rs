pub mod config;
pub mod errors;
pub mod ingest;
pub mod llm;
pub mod logging;
pub mod rag;
pub mod seed;
pub mod server;
pub mod state;
pub mod store;
