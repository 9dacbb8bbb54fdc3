pub mod types;
pub mod config;
pub mod fetcher;
pub mod extractor;
pub mod parser;
pub mod llm_adapter;
pub mod summarizer;
pub mod pipeline;
pub mod server;

pub use types::*;
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use llm_adapter::{LlmAdapter, MockLlmAdapter, OpenAiCompatibleAdapter};
pub use summarizer::Summarizer;
pub use pipeline::SummaryPipeline;
pub use server::{build_router, AppState};
