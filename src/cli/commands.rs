//! CLI command implementations
//!
//! Commands load configuration first, then the dataset, then touch the run
//! store. A failed run is never persisted.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::json;

use crate::engine::{self, RunContext, RunResult};
use crate::explanation::{build_narrative, format_text};
use crate::history::{validate_scope, FileRunStore, PriorRunRecord, RunStore};
use crate::ingest::{load_path, Dataset};
use crate::observability::{log_event_with_fields, Event, Logger};

use super::args::{Command, OutputFormat};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_response, write_text};

/// Options for `analyze`
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub config: Option<PathBuf>,
    pub store: Option<PathBuf>,
    pub scope: Option<String>,
    pub no_persist: bool,
    pub format: OutputFormat,
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Analyze {
            dataset,
            config,
            store,
            scope,
            no_persist,
            format,
        } => analyze(
            &dataset,
            AnalyzeOptions {
                config,
                store,
                scope,
                no_persist,
                format,
            },
        ),
        Command::Schema { dataset, config } => schema(&dataset, config.as_deref()),
        Command::History {
            scope,
            config,
            store,
        } => history(&scope, config.as_deref(), store.as_deref()),
    }
}

fn load_config(explicit: Option<&Path>) -> CliResult<Config> {
    let config = Config::resolve(explicit)?;
    Logger::set_min_severity(config.severity());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("log_level", config.log_level.as_str()),
            ("store_dir", config.store_dir.as_str()),
        ],
    );
    Ok(config)
}

fn load_dataset(path: &Path, config: &Config) -> CliResult<Dataset> {
    let dataset = load_path(path, config.ingest_options())?;
    let path_text = path.display().to_string();
    log_event_with_fields(
        Event::DatasetLoaded,
        &[
            ("columns", dataset.columns().len().to_string().as_str()),
            ("content_hash", dataset.content_hash()),
            ("path", path_text.as_str()),
            ("rows", dataset.row_count().to_string().as_str()),
        ],
    );
    Ok(dataset)
}

/// Scope for a dataset: explicit if given, else the file stem.
pub fn resolve_scope(dataset: &Path, explicit: Option<&str>) -> CliResult<String> {
    let scope = match explicit {
        Some(scope) => scope.to_string(),
        None => dataset
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                CliError::config_error(format!(
                    "Cannot derive a scope from '{}'; pass --scope",
                    dataset.display()
                ))
            })?,
    };
    validate_scope(&scope)?;
    Ok(scope)
}

/// Runs the engine and persists the run record unless told not to.
///
/// The record carries the signature plus the evaluated nodes and narrative.
pub fn analyze_dataset(dataset_path: &Path, options: &AnalyzeOptions) -> CliResult<RunResult> {
    let config = load_config(options.config.as_deref())?;
    let scope = resolve_scope(dataset_path, options.scope.as_deref())?;
    let dataset = load_dataset(dataset_path, &config)?;

    let store = FileRunStore::new(options.store.clone().unwrap_or_else(|| config.store_path()));
    let prior = store.read_latest(&scope)?;

    let ctx = RunContext::new(&dataset).with_expected_columns(&config.expected_columns);
    let result = engine::run(&ctx, prior.as_ref())?;

    if options.no_persist {
        log_event_with_fields(Event::PersistSkipped, &[("scope", scope.as_str())]);
    } else {
        let record = PriorRunRecord::new(result.signature.clone(), Utc::now())
            .with_conclusions(result.nodes.clone(), build_narrative(&result));
        store.append_record(&scope, &record)?;
        let store_text = store.dir().display().to_string();
        log_event_with_fields(
            Event::RunPersisted,
            &[("scope", scope.as_str()), ("store", store_text.as_str())],
        );
    }
    Ok(result)
}

/// `analyze <dataset>`
pub fn analyze(dataset_path: &Path, options: AnalyzeOptions) -> CliResult<()> {
    let result = analyze_dataset(dataset_path, &options)?;
    match options.format {
        OutputFormat::Json => write_response(serde_json::to_value(&result)?),
        OutputFormat::Text => write_text(&format_text(&build_narrative(&result), &result)),
    }
}

/// `schema <dataset>`
pub fn schema(dataset_path: &Path, config: Option<&Path>) -> CliResult<()> {
    let config = load_config(config)?;
    let dataset = load_dataset(dataset_path, &config)?;
    write_response(json!({
        "content_hash": dataset.content_hash(),
        "rows": dataset.row_count(),
        "columns": dataset.schema(),
    }))
}

/// `history <scope>`
pub fn history(scope: &str, config: Option<&Path>, store: Option<&Path>) -> CliResult<()> {
    let config = load_config(config)?;
    let store = FileRunStore::new(store.map(Path::to_path_buf).unwrap_or_else(|| config.store_path()));
    let records = store.list(scope)?;
    write_response(json!({
        "scope": scope,
        "records": records,
    }))
}
