//! Data models for the document pipeline.

mod analysis;
mod document;

pub use analysis::{AnalysisRecord, ErrorState};
pub use document::{ExtractedText, SelectedFile, UploadHandle, DEFAULT_RESULTS_SUFFIX};
