//! Analysis client.
//!
//! Sends extracted text to the analysis endpoint and turns the model's
//! free-text answer into an [`AnalysisRecord`].

mod completion;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::http_client::{Transport, TransportError};
use crate::models::{AnalysisRecord, ExtractedText};

pub use completion::{clean_completion_content, parse_completion};

/// Errors that can occur while fetching an analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Analysis response was empty")]
    EmptyResponse,

    #[error("Analysis response has no completion content")]
    MissingContent,

    #[error("Failed to parse analysis: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Analysis request body: `{text}`.
#[derive(Debug, Serialize)]
struct AnalysisRequest<'a> {
    text: &'a str,
}

/// Requests structured analyses of extracted text.
pub struct AnalysisFetcher {
    transport: Arc<dyn Transport>,
    analysis_path: String,
}

impl AnalysisFetcher {
    pub fn new(transport: Arc<dyn Transport>, analysis_path: &str) -> Self {
        Self {
            transport,
            analysis_path: analysis_path.to_string(),
        }
    }

    /// Analyze a document's text.
    pub async fn analyze(&self, text: &ExtractedText) -> Result<AnalysisRecord, AnalysisError> {
        debug!("Requesting analysis for {} chars", text.content.len());
        let body = serde_json::to_value(AnalysisRequest {
            text: &text.content,
        })?;

        let response = self.transport.post_json(&self.analysis_path, &body).await?;
        let record = parse_completion(&response)?;

        info!(
            "Analysis ready (risk score: {})",
            record
                .risk_score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "n/a".to_string())
        );
        Ok(record)
    }
}
