//! Shared utility functions.
//!
//! - `format`: Human-readable formatting (sizes, etc.)
//! - `mime`: MIME type detection and icons

mod format;
pub mod mime;

pub use format::format_size;
pub use mime::{detect_mime, mime_icon};
