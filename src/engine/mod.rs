//! Reasoning engine
//!
//! Entry point [`run`] takes an immutable [`RunContext`] and the latest
//! prior run record and returns a complete [`RunResult`] or one typed
//! [`EngineError`].

pub mod context;
pub mod errors;
mod pipeline;
mod result;

pub use context::{RunContext, Thresholds};
pub use errors::{EngineError, EngineErrorCode, EngineResult};
pub use pipeline::run;
pub use result::RunResult;
