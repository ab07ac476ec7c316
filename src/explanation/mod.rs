//! Human-readable rendering of run results

mod formatter;
mod narrative;

pub use formatter::format_text;
pub use narrative::{build_narrative, NO_PATTERNS};
