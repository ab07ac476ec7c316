//! CLI argument definitions using clap
//!
//! Commands:
//! - datathought analyze <dataset> [--config] [--store] [--scope] [--no-persist] [--format]
//! - datathought schema <dataset> [--config]
//! - datathought history <scope> [--config] [--store]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Deterministic anomaly reasoning over tabular data
#[derive(Parser, Debug)]
#[command(name = "datathought")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `{"status":"ok","data":<result>}`
    #[default]
    Json,
    /// Narrative and summary
    Text,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a CSV dataset and compare with the previous run
    Analyze {
        /// Path to the CSV dataset
        dataset: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Run store directory (overrides config)
        #[arg(long)]
        store: Option<PathBuf>,

        /// History scope (defaults to the dataset file stem)
        #[arg(long)]
        scope: Option<String>,

        /// Do not append this run to the store
        #[arg(long)]
        no_persist: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Print the inferred column schema
    Schema {
        /// Path to the CSV dataset
        dataset: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List stored signatures for a scope, oldest first
    History {
        scope: String,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Run store directory (overrides config)
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
