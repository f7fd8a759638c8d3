//! docsense - document upload and risk analysis client.
//!
//! Uploads a small document, polls until the OCR extraction job publishes
//! its text, then requests a structured analysis (risk score, summary
//! points, flagged clauses) of that text.

pub mod cli;
pub mod config;
pub mod http_client;
pub mod llm;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod state;
pub mod utils;

pub use config::Config;
pub use orchestrator::Orchestrator;
