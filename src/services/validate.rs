//! File acceptance rules.

use thiserror::Error;

use crate::models::SelectedFile;

/// Largest accepted upload (150 KB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 150 * 1024;

/// Reasons a file is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File size exceeds {}KB. Please upload a smaller file.", .limit.div_ceil(1024))]
    FileTooLarge { size: u64, limit: u64 },
}

/// Enforces the upload size ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    max_bytes: u64,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_BYTES)
    }
}

impl Validator {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Accept or reject a single file.
    pub fn validate(&self, file: &SelectedFile) -> Result<SelectedFile, ValidationError> {
        if file.size_bytes > self.max_bytes {
            return Err(ValidationError::FileTooLarge {
                size: file.size_bytes,
                limit: self.max_bytes,
            });
        }
        Ok(file.clone())
    }

    /// Validate a drop. Only the first file of a multi-file drop is considered.
    ///
    /// Returns `None` for an empty drop.
    pub fn validate_drop(
        &self,
        files: &[SelectedFile],
    ) -> Option<Result<SelectedFile, ValidationError>> {
        files.first().map(|file| self.validate(file))
    }
}
