//! Run store errors

use std::path::PathBuf;

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Run store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt run record in {path} at line {line}: {reason}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Invalid run scope: '{0}'")]
    InvalidScope(String),

    #[error("Run record could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "DTE_STORE_IO",
            StoreError::Corrupt { .. } => "DTE_STORE_CORRUPT",
            StoreError::InvalidScope(_) => "DTE_STORE_INVALID_SCOPE",
            StoreError::Encode(_) => "DTE_STORE_ENCODE",
        }
    }
}
