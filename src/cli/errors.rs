//! CLI-specific error types
//!
//! Every error ends the command with a non-zero exit. Errors raised below
//! the CLI keep their own code so the operator sees the precise cause.

use std::fmt;
use std::io;

use crate::engine::EngineError;
use crate::history::StoreError;
use crate::ingest::IngestError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout/stderr)
    IoError,
    /// Dataset could not be read or parsed
    IngestFailed,
    /// The engine aborted the run
    RunFailed,
    /// Run store failure
    StoreFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "DTE_CLI_CONFIG_ERROR",
            Self::IoError => "DTE_CLI_IO_ERROR",
            Self::IngestFailed => "DTE_CLI_INGEST_FAILED",
            Self::RunFailed => "DTE_CLI_RUN_FAILED",
            Self::StoreFailed => "DTE_CLI_STORE_FAILED",
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    /// Code of the underlying error, if any
    cause: Option<&'static str>,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            cause: None,
            message: message.into(),
        }
    }

    fn caused_by(mut self, cause: &'static str) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// The most specific code available
    pub fn code_str(&self) -> &'static str {
        self.cause.unwrap_or_else(|| self.code.code())
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<IngestError> for CliError {
    fn from(e: IngestError) -> Self {
        Self::new(CliErrorCode::IngestFailed, e.to_string()).caused_by(e.code())
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        Self::new(CliErrorCode::RunFailed, e.to_string()).caused_by(e.code().code())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::new(CliErrorCode::StoreFailed, e.to_string()).caused_by(e.code())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
