//! Document models: the selected file, its upload handle, and extracted text.
//!
//! All of these are replaced wholesale when they change. None of them are
//! mutated in place after construction.

use std::path::Path;
use std::sync::Arc;

use crate::utils::mime::detect_mime;

/// Suffix appended to the upload location to find the extraction results.
pub const DEFAULT_RESULTS_SUFFIX: &str = "-results.json";

/// A file chosen by the user for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as shown to the user (no directory components).
    pub name: String,
    /// MIME type sent along with the upload.
    pub mime_type: String,
    /// Size of the content in bytes.
    pub size_bytes: u64,
    /// Raw file content.
    pub raw_bytes: Arc<[u8]>,
}

impl SelectedFile {
    /// Create a selected file from in-memory content.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let raw_bytes: Arc<[u8]> = bytes.into();
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: raw_bytes.len() as u64,
            raw_bytes,
        }
    }

    /// Read a file from disk, detecting its MIME type from content and extension.
    pub async fn load(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = detect_mime(&name, &bytes);
        Ok(Self::new(name, mime_type, bytes))
    }
}

/// Where the extraction job will publish its results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UploadHandle {
    pub results_location: String,
}

impl UploadHandle {
    /// Derive the results location from the location token returned by the upload endpoint.
    pub fn from_location(location: &str, suffix: &str) -> Self {
        Self {
            results_location: format!("{}{}", location, suffix),
        }
    }
}

/// Text produced by the OCR extraction job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub content: String,
}

impl ExtractedText {
    /// Join extracted lines with single spaces.
    ///
    /// Returns `None` for an empty sequence, which means the job is not done yet.
    pub fn from_lines(lines: &[String]) -> Option<Self> {
        if lines.is_empty() {
            return None;
        }
        Some(Self {
            content: lines.join(" "),
        })
    }
}
