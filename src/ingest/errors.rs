//! # Ingestion Errors

use std::path::PathBuf;

use thiserror::Error;

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

/// Ingestion errors
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input is not valid UTF-8")]
    InvalidEncoding,

    #[error("Input has no header row")]
    MissingHeader,

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },
}

impl IngestError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            IngestError::Io { .. } => "DTE_INGEST_IO",
            IngestError::InvalidEncoding => "DTE_INGEST_ENCODING",
            IngestError::MissingHeader => "DTE_INGEST_MISSING_HEADER",
            IngestError::DuplicateColumn(_) => "DTE_INGEST_DUPLICATE_COLUMN",
            IngestError::RaggedRow { .. } => "DTE_INGEST_RAGGED_ROW",
            IngestError::UnterminatedQuote { .. } => "DTE_INGEST_UNTERMINATED_QUOTE",
        }
    }
}
