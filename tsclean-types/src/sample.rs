//! Sample and summary-statistic records.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped measurement plus the deltas derived from its chronological
/// predecessor.
///
/// `value` is `None` for an explicit "no data" marker (an empty resampling
/// bucket, or a reading that arrived as NaN or infinity). A missing value is
/// never the same thing as a measured zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Instant the measurement was taken.
    pub ts: DateTime<Utc>,
    /// Time elapsed since the preceding sample; zero for the first sample.
    #[serde(with = "micros")]
    pub delta_time: TimeDelta,
    /// Measured value, or `None` when no data exists for this instant.
    pub value: Option<f64>,
    /// `value` minus the preceding sample's value; `None` if either is missing.
    pub delta_value: Option<f64>,
    /// Provenance tag: rejection cause or gap marker. `None` for raw samples.
    pub origin: Option<String>,
}

impl Sample {
    /// A raw measured sample with zeroed deltas. A non-finite `value` yields a
    /// "no data" marker.
    #[must_use]
    pub const fn new(ts: DateTime<Utc>, value: f64) -> Self {
        if !value.is_finite() {
            return Self::missing(ts);
        }
        Self {
            ts,
            delta_time: TimeDelta::zero(),
            value: Some(value),
            delta_value: Some(0.0),
            origin: None,
        }
    }

    /// A "no data" marker at `ts`.
    #[must_use]
    pub const fn missing(ts: DateTime<Utc>) -> Self {
        Self {
            ts,
            delta_time: TimeDelta::zero(),
            value: None,
            delta_value: None,
            origin: None,
        }
    }

    /// Attach a provenance tag, replacing any previous one.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// The measured value, if finite.
    ///
    /// `value` is public, so a sample built by hand or deserialized may still
    /// carry `Some(NaN)`; every computation reads values through this.
    #[must_use]
    pub fn measured(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }

    /// Whether this sample marks missing data.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.measured().is_none()
    }
}

/// Cached summary of a series. Derived data only: recomputed by the owning
/// series whenever its samples are replaced, reordered or trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStat {
    /// Number of samples, missing markers included.
    pub count: usize,
    /// Earliest timestamp.
    pub ts_min: DateTime<Utc>,
    /// Latest timestamp.
    pub ts_max: DateTime<Utc>,
    /// Sum of inter-sample gaps divided by `count - 2`.
    ///
    /// The divisor is kept as-is even though it disagrees with `gap_std`;
    /// `None` when `count == 2` makes it zero.
    #[serde(with = "opt_micros")]
    pub gap_mean: Option<TimeDelta>,
    /// Population standard deviation of the gaps over all `count` positions,
    /// the leading zero gap included.
    #[serde(with = "opt_micros")]
    pub gap_std: Option<TimeDelta>,
    /// Smallest measured value.
    pub value_min: f64,
    /// Largest measured value.
    pub value_max: f64,
    /// Mean of the measured values.
    pub value_mean: f64,
    /// Population standard deviation of the measured values.
    pub value_std: f64,
}

mod micros {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(d: &TimeDelta, s: S) -> Result<S::Ok, S::Error> {
        d.num_microseconds().unwrap_or(i64::MAX).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<TimeDelta, D::Error> {
        Ok(TimeDelta::microseconds(i64::deserialize(d)?))
    }
}

mod opt_micros {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(d: &Option<TimeDelta>, s: S) -> Result<S::Ok, S::Error> {
        d.map(|d| d.num_microseconds().unwrap_or(i64::MAX)).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<TimeDelta>, D::Error> {
        Ok(Option::<i64>::deserialize(d)?.map(TimeDelta::microseconds))
    }
}
