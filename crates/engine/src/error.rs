use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a [`FilterLoader`](crate::FilterLoader).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("filter request was cancelled")]
    Cancelled,
    #[error("failed to read filter catalog from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode filter catalog")]
    Decode(#[from] serde_json::Error),
    #[error("filter source unavailable: {0}")]
    Unavailable(String),
}

impl LoadError {
    /// Cancellation is expected when a session is torn down and is not worth reporting.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
