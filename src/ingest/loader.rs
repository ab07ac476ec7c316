//! Dataset loader
//!
//! Reads a delimited file, hashes the raw bytes, infers the schema from a
//! bounded sample and converts every ingested cell to its column type.

use std::fs;
use std::path::Path;

use super::errors::{IngestError, IngestResult};
use super::reader;
use super::schema::{convert_cell, infer_column_types};
use super::types::{Column, Dataset};
use crate::fingerprint::content_hash;

/// Row limits applied during ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Data rows ingested for analysis
    pub max_rows: usize,
    /// Data rows sampled for type inference
    pub sample_rows: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_rows: 1000,
            sample_rows: 200,
        }
    }
}

/// Loads a dataset from disk.
pub fn load_path(path: &Path, options: IngestOptions) -> IngestResult<Dataset> {
    let raw = fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_bytes(&raw, options)
}

/// Builds a dataset from raw bytes.
///
/// The content hash covers every byte, including rows beyond `max_rows`.
pub fn load_bytes(raw: &[u8], options: IngestOptions) -> IngestResult<Dataset> {
    let text = std::str::from_utf8(raw).map_err(|_| IngestError::InvalidEncoding)?;
    let table = reader::parse(text, Some(options.max_rows))?;
    let types = infer_column_types(&table.header, &table.rows, options.sample_rows);

    let columns = table
        .header
        .iter()
        .zip(types)
        .enumerate()
        .map(|(index, (name, column_type))| {
            let values = table
                .rows
                .iter()
                .map(|row| convert_cell(&row[index], column_type))
                .collect();
            Column::new(name.clone(), column_type, values)
        })
        .collect();

    let sample_size = table.rows.len().min(options.sample_rows);
    Ok(Dataset::new(columns, content_hash(raw), sample_size))
}
