use std::path::PathBuf;
use thiserror::Error;

/// Failure taxonomy for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No user identity available; the operation was aborted before any
    /// store access.
    #[error("no authenticated user")]
    Unauthenticated,

    /// The referenced baby or entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A stored document does not match the expected shape.
    #[error("failed to decode document {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Io/store-level failure, propagated as-is.
    #[error("storage failure: {0}")]
    Store(#[from] std::io::Error),
}

impl StoreError {
    pub fn not_found(what: impl Into<String>) -> Self {
        StoreError::NotFound(what.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, StoreError::Unauthenticated)
    }
}
