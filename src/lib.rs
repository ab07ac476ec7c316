//! datathought - deterministic anomaly reasoning over tabular data
//!
//! A run ingests one dataset, detects anomalous signals per column,
//! generates two competing hypotheses per signal, evaluates them over a
//! dependency DAG in a fixed order, and compares the resulting signature
//! with the previous run for the same dataset scope. Identical bytes in
//! give byte-identical results out.

pub mod cli;
pub mod dag;
pub mod engine;
pub mod explanation;
pub mod fingerprint;
pub mod history;
pub mod hypothesis;
pub mod ingest;
pub mod observability;
pub mod observation;
pub mod reasoning;
