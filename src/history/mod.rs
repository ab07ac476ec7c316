//! Consistency engine and run history
//!
//! The engine computes a signature per run and classifies it against the
//! latest record in the run store. Persisting the new record is left to the
//! caller, after the run succeeded.

mod comparison;
mod errors;
mod signature;
mod store;

pub use comparison::{classify, find_regressions, ComparisonResult, Regression};
pub use errors::{StoreError, StoreResult};
pub use signature::{dominant_of, ReasoningSignature};
pub use store::{validate_scope, FileRunStore, MemoryRunStore, PriorRunRecord, RunStore};
