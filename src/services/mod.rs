//! Service layer for the document pipeline.
//!
//! Each service owns one stage: validation, upload, and results polling.
//! Services are independent of presentation and are driven by the
//! orchestrator.

pub mod poll;
pub mod upload;
pub mod validate;

pub use poll::{PollEvent, PollerState, ResultPoller, DEFAULT_POLL_INTERVAL};
pub use upload::{UploadError, Uploader};
pub use validate::{ValidationError, Validator, DEFAULT_MAX_FILE_BYTES};
