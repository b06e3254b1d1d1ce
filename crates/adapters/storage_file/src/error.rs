//! Storage-specific error type wrapping IO and JSON errors.

use helpline_domain::error::HelplineError;

/// Errors originating from the file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or replacing the state file failed.
    #[error("state file IO error")]
    Io(#[from] std::io::Error),

    /// The state file is not a JSON object of strings.
    #[error("state file JSON error")]
    Json(#[from] serde_json::Error),
}

impl From<StorageError> for HelplineError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
