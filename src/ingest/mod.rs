pub mod chunker;
pub mod fetch;
pub mod pipeline;

pub use fetch::ContentFetcher;
pub use pipeline::IngestPipeline;
