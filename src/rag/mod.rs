mod answer;

pub use answer::{Answer, AnswerPipeline, EMPTY_KNOWLEDGE_BASE_ANSWER};
