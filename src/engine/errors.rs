//! Engine error types
//!
//! Error codes:
//! - DTE_INSUFFICIENT_DATA (FATAL)
//! - DTE_DEGENERATE_INPUT (FATAL)
//! - DTE_CIRCULAR_REASONING (FATAL)
//! - DTE_SCHEMA_MISMATCH (FATAL)
//! - DTE_DANGLING_DEPENDENCY (FATAL)
//!
//! Every engine error aborts the run. There is no retry and no partial result.

use std::fmt;

/// Engine error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorCode {
    /// A column lacks enough non-absent values for a statistic
    InsufficientData,
    /// A statistic is undefined for the input (e.g. zero mean)
    DegenerateInput,
    /// A cycle exists among hypothesis or node dependencies
    CircularReasoning,
    /// An expected column or type is absent from the ingested view
    SchemaMismatch,
    /// A hypothesis depends on an identifier outside the hypothesis set
    DanglingDependency,
}

impl EngineErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            EngineErrorCode::InsufficientData => "DTE_INSUFFICIENT_DATA",
            EngineErrorCode::DegenerateInput => "DTE_DEGENERATE_INPUT",
            EngineErrorCode::CircularReasoning => "DTE_CIRCULAR_REASONING",
            EngineErrorCode::SchemaMismatch => "DTE_SCHEMA_MISMATCH",
            EngineErrorCode::DanglingDependency => "DTE_DANGLING_DEPENDENCY",
        }
    }
}

impl fmt::Display for EngineErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Engine error with full context
#[derive(Debug, Clone, PartialEq)]
pub struct EngineError {
    code: EngineErrorCode,
    message: String,
    column: Option<String>,
    participants: Vec<String>,
}

impl EngineError {
    fn new(code: EngineErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            column: None,
            participants: Vec::new(),
        }
    }

    /// A statistic was requested over an empty sequence
    pub fn insufficient_data(statistic: &str) -> Self {
        Self::new(
            EngineErrorCode::InsufficientData,
            format!("'{}' requires at least one value", statistic),
        )
    }

    /// A statistic is undefined for the given input
    pub fn degenerate_input(statistic: &str, reason: impl Into<String>) -> Self {
        Self::new(
            EngineErrorCode::DegenerateInput,
            format!("'{}' is undefined: {}", statistic, reason.into()),
        )
    }

    /// A cycle was found; `participants` are sorted before storing
    pub fn circular_reasoning(mut participants: Vec<String>) -> Self {
        participants.sort();
        participants.dedup();
        Self {
            code: EngineErrorCode::CircularReasoning,
            message: format!("dependency cycle among [{}]", participants.join(", ")),
            column: None,
            participants,
        }
    }

    /// An expected column is missing or carries the wrong type
    pub fn schema_mismatch(column: impl Into<String>, expected: &str, actual: &str) -> Self {
        let column = column.into();
        Self {
            code: EngineErrorCode::SchemaMismatch,
            message: format!("column '{}': expected {}, found {}", column, expected, actual),
            column: Some(column),
            participants: Vec::new(),
        }
    }

    /// A dependency points outside the validated hypothesis set
    pub fn dangling_dependency(hypothesis_id: &str, missing: &str) -> Self {
        Self {
            code: EngineErrorCode::DanglingDependency,
            message: format!(
                "hypothesis '{}' depends on unknown hypothesis '{}'",
                hypothesis_id, missing
            ),
            column: None,
            participants: vec![hypothesis_id.to_string(), missing.to_string()],
        }
    }

    /// Attaches the column the failing statistic was computed over
    pub fn in_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Returns the error code
    pub fn code(&self) -> EngineErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the column, if the error is tied to one
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Returns the identifiers involved (cycle members, dangling pair)
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    /// Engine errors always abort the run
    pub fn is_fatal(&self) -> bool {
        true
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[FATAL] {}: {}", self.code.code(), self.message)?;
        if let Some(ref column) = self.column {
            write!(f, " (column '{}')", column)?;
        }
        Ok(())
    }
}

impl std::error::Error for EngineError {}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
