//! Transport errors.

use thiserror::Error;

/// Errors that can occur while talking to a remote endpoint.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}
