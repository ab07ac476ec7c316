//! Observation: metrics, detectors and the signals they emit

pub mod detectors;
pub mod metrics;
mod signal;

pub use detectors::{
    detect_column, detect_distribution_shift, detect_monotonic_break, detect_signals,
    detect_variance_spike,
};
pub use signal::{Signal, SignalKind};
