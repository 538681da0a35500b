//! Report envelopes produced by trimming and resampling passes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::frequency::Frequency;
use crate::sample::SummaryStat;

/// Outcome of one outlier-trimming pass.
///
/// Carries the acceptance interval that was applied, how many samples fell
/// on each side of it, and the summary of the surviving series when it still
/// has enough samples for one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimReport {
    /// Audit text attached to every sample this pass rejected.
    pub cause: String,
    /// Lower bound of the acceptance interval.
    pub min: f64,
    /// Upper bound of the acceptance interval.
    pub max: f64,
    /// Samples in the series before the pass.
    pub before: usize,
    /// Samples rejected for lying below `min`.
    pub rejected_low: usize,
    /// Samples rejected for lying above `max`.
    pub rejected_high: usize,
    /// Samples kept.
    pub kept: usize,
    /// Execution instant stamped into `cause`.
    pub at: DateTime<Utc>,
    /// Summary of the survivors; `None` if fewer than two remain.
    pub summary: Option<SummaryStat>,
}

impl TrimReport {
    /// Total samples rejected by this pass.
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.rejected_low + self.rejected_high
    }
}

/// Outcome of one resampling call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResampleReport {
    /// Grid interval that was applied.
    pub frequency: Frequency,
    /// Name of the aggregation rule.
    pub aggregation: String,
    /// Source samples consumed.
    pub consumed: usize,
    /// Buckets emitted.
    pub buckets: usize,
    /// Buckets emitted without a value.
    pub gaps: usize,
}
