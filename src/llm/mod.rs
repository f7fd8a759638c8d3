//! Document analysis through a chat-completion style endpoint.

mod client;

pub use client::{clean_completion_content, parse_completion, AnalysisError, AnalysisFetcher};
