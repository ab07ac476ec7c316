//! Run store: append-only history of reasoning runs
//!
//! One history per dataset scope. Each record keeps the signature used for
//! classification next to what the run concluded: the outcome summary, every
//! evaluated node and the rendered narrative, so a past run can be audited
//! without replaying it. The engine only reads the signature of the latest
//! record; appending happens after a successful run and never for a failed one.
//!
//! `FileRunStore` format: one JSON record per line in `<dir>/<scope>.jsonl`,
//! flushed and synced before `append` returns. Any unreadable line fails
//! the read instead of being skipped.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reasoning::{OutcomeSummary, ReasoningNode};

use super::errors::{StoreError, StoreResult};
use super::signature::ReasoningSignature;

const RECORD_EXTENSION: &str = "jsonl";

/// One stored run
///
/// Records written with only a signature read back with an empty summary,
/// no nodes and an empty narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorRunRecord {
    pub signature: ReasoningSignature,
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub summary: OutcomeSummary,
    #[serde(default)]
    pub nodes: Vec<ReasoningNode>,
    #[serde(default)]
    pub narrative: String,
}

impl PriorRunRecord {
    pub fn new(signature: ReasoningSignature, recorded_at: DateTime<Utc>) -> Self {
        Self {
            signature,
            recorded_at,
            summary: OutcomeSummary::default(),
            nodes: Vec::new(),
            narrative: String::new(),
        }
    }

    /// Attaches the evaluated nodes and narrative. The summary is recounted
    /// from the nodes so the two cannot disagree.
    pub fn with_conclusions(mut self, nodes: Vec<ReasoningNode>, narrative: impl Into<String>) -> Self {
        self.summary = OutcomeSummary::from_nodes(&nodes);
        self.nodes = nodes;
        self.narrative = narrative.into();
        self
    }
}

pub trait RunStore {
    /// The record appended last for the scope, if any.
    fn read_latest(&self, scope: &str) -> StoreResult<Option<PriorRunRecord>>;

    fn append_record(&self, scope: &str, record: &PriorRunRecord) -> StoreResult<()>;

    /// Appends a record holding only the signature.
    fn append(
        &self,
        scope: &str,
        signature: &ReasoningSignature,
        recorded_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        self.append_record(scope, &PriorRunRecord::new(signature.clone(), recorded_at))
    }

    /// All records for the scope, oldest first.
    fn list(&self, scope: &str) -> StoreResult<Vec<PriorRunRecord>>;
}

/// Rejects scopes that could escape the store directory.
pub fn validate_scope(scope: &str) -> StoreResult<()> {
    let invalid = scope.is_empty()
        || scope.contains("..")
        || scope.contains(['/', '\\'])
        || scope.chars().any(char::is_control);
    if invalid {
        return Err(StoreError::InvalidScope(scope.to_string()));
    }
    Ok(())
}

/// In-memory run store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryRunStore {
    records: Mutex<BTreeMap<String, Vec<PriorRunRecord>>>,
}

impl MemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, scope: &str) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(scope)
            .map_or(0, Vec::len)
    }
}

impl RunStore for MemoryRunStore {
    fn read_latest(&self, scope: &str) -> StoreResult<Option<PriorRunRecord>> {
        validate_scope(scope)?;
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(scope).and_then(|r| r.last().cloned()))
    }

    fn append_record(&self, scope: &str, record: &PriorRunRecord) -> StoreResult<()> {
        validate_scope(scope)?;
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.entry(scope.to_string()).or_default().push(record.clone());
        Ok(())
    }

    fn list(&self, scope: &str) -> StoreResult<Vec<PriorRunRecord>> {
        validate_scope(scope)?;
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(scope).cloned().unwrap_or_default())
    }
}

/// File-backed run store, one JSON-lines file per scope.
#[derive(Debug, Clone)]
pub struct FileRunStore {
    dir: PathBuf,
}

impl FileRunStore {
    /// Opens a store rooted at `dir`. The directory is created on first append.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn scope_path(&self, scope: &str) -> StoreResult<PathBuf> {
        validate_scope(scope)?;
        Ok(self.dir.join(format!("{}.{}", scope, RECORD_EXTENSION)))
    }

    fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl RunStore for FileRunStore {
    fn read_latest(&self, scope: &str) -> StoreResult<Option<PriorRunRecord>> {
        Ok(self.list(scope)?.pop())
    }

    fn append_record(&self, scope: &str, record: &PriorRunRecord) -> StoreResult<()> {
        let path = self.scope_path(scope)?;
        let line = serde_json::to_string(record)?;

        fs::create_dir_all(&self.dir).map_err(Self::io_error(&self.dir))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(Self::io_error(&path))?;
        writeln!(file, "{}", line).map_err(Self::io_error(&path))?;
        file.flush().map_err(Self::io_error(&path))?;
        file.sync_all().map_err(Self::io_error(&path))
    }

    fn list(&self, scope: &str) -> StoreResult<Vec<PriorRunRecord>> {
        let path = self.scope_path(scope)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::io_error(&path)(e)),
        };

        let mut records = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(line).map_err(|e| StoreError::Corrupt {
                path: path.clone(),
                line: index + 1,
                reason: e.to_string(),
            })?;
            records.push(record);
        }
        Ok(records)
    }
}
