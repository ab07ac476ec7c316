//! Observability: structured logging and run lifecycle events
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. Logging never influences results
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use datathought::observability::{log_event_with_fields, Event, Logger, ObservationScope};
//!
//! Logger::info("DATASET_LOADED", &[("rows", "30")]);
//! log_event_with_fields(Event::RunComplete, &[("comparison", "exact_match")]);
//!
//! let scope = ObservationScope::new("DETECT");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

fn severity_of(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_of(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_of(event), event.as_str(), fields);
}
