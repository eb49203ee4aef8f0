//! Export errors.

use super::error_code::{self, CodevoErrorCode};

/// Errors that can occur while writing step logs, snapshots or renderings.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {message}")]
    Serialization { message: String },
}

impl CodevoErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        error_code::EXPORT_ERROR
    }
}
