//! Typed, column-oriented dataset view
//!
//! Supported column types:
//! - integer: 64-bit signed integer
//! - real: 64-bit floating point
//! - timestamp: seconds since the Unix epoch
//! - boolean
//! - text: UTF-8 string
//! - absent: a column with no usable values
//!
//! The view is immutable for the duration of a run.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::errors::{EngineError, EngineResult};
use crate::fingerprint::content_hash;

/// Inferred column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Real,
    Timestamp,
    Boolean,
    Text,
    Absent,
}

impl ColumnType {
    /// Returns the type name used in schemas and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Real => "real",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Boolean => "boolean",
            ColumnType::Text => "text",
            ColumnType::Absent => "absent",
        }
    }

    /// Integer and real columns feed the variance statistics
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Real)
    }

    /// Columns with a meaningful ordering of values
    pub fn is_ordered(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Real | ColumnType::Timestamp)
    }

    /// Columns whose values are treated as categories
    pub fn is_categorical(&self) -> bool {
        matches!(self, ColumnType::Text | ColumnType::Boolean)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A single typed cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Timestamp(i64),
    Boolean(bool),
    Text(String),
    Absent,
}

impl Value {
    /// Numeric projection for ordered values
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Real(v) => Some(*v),
            Value::Timestamp(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Category key for frequency counting
    pub fn category(&self) -> Option<String> {
        match self {
            Value::Absent => None,
            Value::Text(s) => Some(s.clone()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Integer(v) | Value::Timestamp(v) => Some(v.to_string()),
            Value::Real(v) => Some(v.to_string()),
        }
    }
}

/// One named, typed column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            column_type,
            values,
        }
    }

    /// Convenience constructor for a real-valued column without gaps
    pub fn real(name: impl Into<String>, values: &[f64]) -> Self {
        Self::new(name, ColumnType::Real, values.iter().map(|v| Value::Real(*v)).collect())
    }

    /// Convenience constructor for a text column without gaps
    pub fn text(name: impl Into<String>, values: &[&str]) -> Self {
        Self::new(
            name,
            ColumnType::Text,
            values.iter().map(|v| Value::Text(v.to_string())).collect(),
        )
    }

    /// Non-absent values projected to f64, in row order
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_f64).collect()
    }

    /// Frequency of each non-absent category, keyed in sorted order
    pub fn category_counts(&self) -> BTreeMap<String, u64> {
        let mut counts = BTreeMap::new();
        for category in self.values.iter().filter_map(Value::category) {
            *counts.entry(category).or_insert(0) += 1;
        }
        counts
    }
}

/// Schema entry reported by ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub sample_size: usize,
}

/// Immutable dataset view handed to the engine
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    content_hash: String,
    sample_size: usize,
}

impl Dataset {
    /// Creates a view with a precomputed content hash
    pub fn new(columns: Vec<Column>, content_hash: impl Into<String>, sample_size: usize) -> Self {
        Self {
            columns,
            content_hash: content_hash.into(),
            sample_size,
        }
    }

    /// Creates a view hashing the raw bytes it was ingested from
    pub fn from_raw(columns: Vec<Column>, raw: &[u8]) -> Self {
        let sample_size = columns.iter().map(|c| c.values.len()).max().unwrap_or(0);
        Self::new(columns, content_hash(raw), sample_size)
    }

    /// Columns in schema order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn row_count(&self) -> usize {
        self.columns.iter().map(|c| c.values.len()).max().unwrap_or(0)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Schema entries in column order
    pub fn schema(&self) -> Vec<ColumnSchema> {
        self.columns
            .iter()
            .map(|c| ColumnSchema {
                name: c.name.clone(),
                column_type: c.column_type,
                sample_size: self.sample_size,
            })
            .collect()
    }

    /// Returns the column if it exists with the expected type.
    ///
    /// # Errors
    ///
    /// `DTE_SCHEMA_MISMATCH` if the column is missing or typed differently.
    pub fn require(&self, name: &str, expected: ColumnType) -> EngineResult<&Column> {
        match self.column(name) {
            None => Err(EngineError::schema_mismatch(name, expected.type_name(), "missing column")),
            Some(c) if c.column_type != expected => Err(EngineError::schema_mismatch(
                name,
                expected.type_name(),
                c.column_type.type_name(),
            )),
            Some(c) => Ok(c),
        }
    }

    /// Checks every expected column, in sorted name order.
    pub fn require_all(&self, expected: &BTreeMap<String, ColumnType>) -> EngineResult<()> {
        for (name, column_type) in expected {
            self.require(name, *column_type)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::errors::EngineErrorCode;

    #[test]
    fn test_numeric_values_skip_absent() {
        let col = Column::new(
            "qty",
            ColumnType::Integer,
            vec![Value::Integer(1), Value::Absent, Value::Real(2.5)],
        );
        assert_eq!(col.numeric_values(), vec![1.0, 2.5]);
    }

    #[test]
    fn test_category_counts_sorted() {
        let col = Column::text("region", &["west", "east", "west"]);
        let counts: Vec<_> = col.category_counts().into_iter().collect();
        assert_eq!(counts, vec![("east".to_string(), 1), ("west".to_string(), 2)]);
    }

    #[test]
    fn test_require_missing_column() {
        let ds = Dataset::from_raw(vec![Column::real("price", &[1.0])], b"price\n1.0\n");
        let err = ds.require("qty", ColumnType::Integer).unwrap_err();
        assert_eq!(err.code(), EngineErrorCode::SchemaMismatch);
        assert_eq!(err.column(), Some("qty"));
    }

    #[test]
    fn test_require_wrong_type() {
        let ds = Dataset::from_raw(vec![Column::real("price", &[1.0])], b"price\n1.0\n");
        assert!(ds.require("price", ColumnType::Text).is_err());
        assert!(ds.require("price", ColumnType::Real).is_ok());
    }

    #[test]
    fn test_column_type_roles() {
        assert!(ColumnType::Integer.is_numeric());
        assert!(!ColumnType::Timestamp.is_numeric());
        assert!(ColumnType::Timestamp.is_ordered());
        assert!(ColumnType::Boolean.is_categorical());
        assert!(!ColumnType::Absent.is_ordered());
    }
}
