//! Document upload.
//!
//! Encodes the selected file as base64, posts it to the upload endpoint, and
//! derives the results location from the returned storage URL.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::http_client::{Transport, TransportError};
use crate::models::{SelectedFile, UploadHandle};

/// Errors that can occur while uploading.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to encode file: {0}")]
    Encode(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Upload response is missing the `url` field")]
    MissingUrl,
}

/// Upload request body: `{file: {name, type, data}}`.
#[derive(Debug, Serialize)]
struct UploadRequest<'a> {
    file: UploadedFile<'a>,
}

#[derive(Debug, Serialize)]
struct UploadedFile<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: Option<String>,
}

/// Submits files to the upload endpoint.
pub struct Uploader {
    transport: Arc<dyn Transport>,
    upload_path: String,
    results_suffix: String,
}

impl Uploader {
    pub fn new(transport: Arc<dyn Transport>, upload_path: &str, results_suffix: &str) -> Self {
        Self {
            transport,
            upload_path: upload_path.to_string(),
            results_suffix: results_suffix.to_string(),
        }
    }

    /// Upload a file and return the handle to poll for results.
    pub async fn upload(&self, file: &SelectedFile) -> Result<UploadHandle, UploadError> {
        let bytes = Arc::clone(&file.raw_bytes);
        let data = tokio::task::spawn_blocking(move || STANDARD.encode(&bytes))
            .await
            .map_err(|e| UploadError::Encode(e.to_string()))?;
        debug!("Encoded {} ({} base64 chars)", file.name, data.len());

        let request = UploadRequest {
            file: UploadedFile {
                name: &file.name,
                mime_type: &file.mime_type,
                data,
            },
        };
        let body = serde_json::to_value(&request).map_err(|e| UploadError::Encode(e.to_string()))?;

        let response = self.transport.post_json(&self.upload_path, &body).await?;
        let location = serde_json::from_value::<UploadResponse>(response)
            .ok()
            .and_then(|r| r.url)
            .ok_or(UploadError::MissingUrl)?;

        let handle = UploadHandle::from_location(&location, &self.results_suffix);
        info!("Uploaded {}, results at {}", file.name, handle.results_location);
        Ok(handle)
    }
}
