//! CLI module
//!
//! Provides command-line interface for:
//! - analyze: Run the engine on a CSV dataset and record the signature
//! - schema: Print the inferred column schema
//! - history: List recorded signatures for a scope

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, OutputFormat};
pub use commands::{analyze, analyze_dataset, history, resolve_scope, run, run_command, schema, AnalyzeOptions};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response, write_text};
