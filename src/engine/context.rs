//! Run context
//!
//! Immutable context passed explicitly to every pipeline stage. Holds the
//! typed dataset view, the columns the caller expects, and the detector
//! thresholds. Stages never read process-wide state.

use std::collections::BTreeMap;

use crate::ingest::{ColumnType, Dataset};

static NO_EXPECTED_COLUMNS: BTreeMap<String, ColumnType> = BTreeMap::new();

/// Fixed detector thresholds.
///
/// Not configurable per run; the only constructor is [`Thresholds::fixed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    variance_ratio: f64,
    min_reversals: u64,
    entropy_low: f64,
    entropy_high: f64,
}

impl Thresholds {
    pub const fn fixed() -> Self {
        Self {
            variance_ratio: 4.0,
            min_reversals: 1,
            entropy_low: 0.5,
            entropy_high: 4.0,
        }
    }

    pub fn variance_ratio(&self) -> f64 {
        self.variance_ratio
    }

    pub fn min_reversals(&self) -> u64 {
        self.min_reversals
    }

    pub fn entropy_low(&self) -> f64 {
        self.entropy_low
    }

    pub fn entropy_high(&self) -> f64 {
        self.entropy_high
    }

    /// Strictly greater than the threshold fires.
    pub fn variance_spike_fires(&self, ratio: f64) -> bool {
        ratio > self.variance_ratio
    }

    pub fn monotonic_break_fires(&self, reversals: u64) -> bool {
        reversals >= self.min_reversals
    }

    /// Returns the bound crossed by `entropy`, if any. Bounds are exclusive.
    pub fn entropy_bound_crossed(&self, entropy: f64) -> Option<f64> {
        if entropy < self.entropy_low {
            Some(self.entropy_low)
        } else if entropy > self.entropy_high {
            Some(self.entropy_high)
        } else {
            None
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::fixed()
    }
}

/// Everything a run may read
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    dataset: &'a Dataset,
    expected_columns: &'a BTreeMap<String, ColumnType>,
    thresholds: Thresholds,
}

impl<'a> RunContext<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            expected_columns: &NO_EXPECTED_COLUMNS,
            thresholds: Thresholds::fixed(),
        }
    }

    /// Columns that must be present with the given type before detection
    pub fn with_expected_columns(mut self, expected: &'a BTreeMap<String, ColumnType>) -> Self {
        self.expected_columns = expected;
        self
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn expected_columns(&self) -> &'a BTreeMap<String, ColumnType> {
        self.expected_columns
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }
}
