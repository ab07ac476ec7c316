//! Ingestion boundary
//!
//! Turns raw delimited text into the immutable, typed, column-oriented view
//! the engine consumes. The engine itself never parses text or infers types.

mod errors;
mod loader;
mod reader;
mod schema;
mod types;

pub use errors::{IngestError, IngestResult};
pub use loader::{load_bytes, load_path, IngestOptions};
pub use reader::{parse, RawTable};
pub use schema::{convert_cell, detect_type, infer_column_types, parse_timestamp};
pub use types::{Column, ColumnSchema, ColumnType, Dataset, Value};
