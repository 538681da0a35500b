//! Outlier trimming.
//!
//! Every policy follows the same shape: compute an acceptance interval
//! `[min, max]` from the current values (or take it from the caller), then
//! move every sample outside it out of the series, tagging it with an audit
//! cause. The survivors are re-normalized chronologically.

use chrono::{DateTime, Utc};

use crate::series::cmp_values;
use crate::stats;
use crate::{Sample, Series, TrimReport, TsError};

/// How the acceptance interval of a trimming pass is obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrimPolicy {
    /// Keep values between the `p` and `1 - p` quantiles; `0 < p < 0.5`.
    Percentile {
        /// Tail fraction cut on each side.
        p: f64,
    },
    /// Keep values inside the device's physical range.
    DeviceLimits {
        /// Lowest plausible reading.
        min: f64,
        /// Highest plausible reading.
        max: f64,
    },
    /// Keep values between `(mean - std) * level` and `(mean + std) * level`,
    /// using the sample standard deviation of the current values.
    ZScore {
        /// Scale applied to both bounds; must be positive.
        level: f64,
    },
}

impl TrimPolicy {
    /// Compute the acceptance interval for `values`.
    ///
    /// # Errors
    /// - `TsError::InvalidArg` for a percentile outside `(0, 0.5)`, device limits
    ///   with `min > max` or non-finite bounds, or a non-positive z-score level.
    /// - `TsError::InsufficientData` when the statistic needs more values than given.
    pub fn bounds(&self, values: &[f64]) -> Result<(f64, f64), TsError> {
        match *self {
            Self::Percentile { p } => {
                if !(p > 0.0 && p < 0.5) {
                    return Err(TsError::InvalidArg(format!(
                        "percentile must lie in (0, 0.5), got {p}"
                    )));
                }
                let lo = stats::quantile(values, p);
                let hi = stats::quantile(values, 1.0 - p);
                lo.zip(hi)
                    .ok_or_else(|| TsError::insufficient(1, values.len()))
            }
            Self::DeviceLimits { min, max } => {
                if !(min.is_finite() && max.is_finite()) || min > max {
                    return Err(TsError::InvalidArg(format!(
                        "device limits must be finite with min <= max, got ({min}, {max})"
                    )));
                }
                Ok((min, max))
            }
            Self::ZScore { level } => {
                if !(level.is_finite() && level > 0.0) {
                    return Err(TsError::InvalidArg(format!(
                        "z-score level must be positive, got {level}"
                    )));
                }
                let mean =
                    stats::mean(values).ok_or_else(|| TsError::insufficient(2, values.len()))?;
                let std = stats::sample_std_dev(values)
                    .ok_or_else(|| TsError::insufficient(2, values.len()))?;
                Ok(((mean - std) * level, (mean + std) * level))
            }
        }
    }

    /// Whether the bounds are derived from the values being trimmed.
    #[must_use]
    pub const fn is_statistical(&self) -> bool {
        !matches!(self, Self::DeviceLimits { .. })
    }

    /// Short policy name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Percentile { .. } => "percentile",
            Self::DeviceLimits { .. } => "device-limits",
            Self::ZScore { .. } => "zscore",
        }
    }

    /// Audit text attached to the samples a pass with this policy rejects.
    #[must_use]
    pub fn cause(&self, min: f64, max: f64, at: DateTime<Utc>) -> String {
        let at = at.to_rfc3339();
        match *self {
            Self::Percentile { .. } => format!("Percentile ({min:.2},{max:.2}) - {at}"),
            Self::DeviceLimits { .. } => format!("DeviceLimit ({min:.2},{max:.2}) - {at}"),
            Self::ZScore { level } => format!("zScore at {level:.2}({min:.2},{max:.2}) - {at}"),
        }
    }
}

/// Outcome of [`trim`]: the report plus the rejected samples, low outliers
/// first in ascending value order, then high outliers in descending order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimOutcome {
    /// Summary of the pass.
    pub report: TrimReport,
    /// Samples moved out of the series, tagged with `report.cause`.
    pub rejected: Vec<Sample>,
}

/// Result of [`slice_outliers`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sliced {
    /// Number of samples rejected below `min`.
    pub low: usize,
    /// Number of samples rejected above `max`.
    pub high: usize,
    /// Rejected samples, low outliers first.
    pub rejected: Vec<Sample>,
}

/// Remove every measured sample outside `[min, max]` from `series`.
///
/// The samples are ordered by value; a forward scan counts the low outliers
/// (`value < min`) and a backward scan, which never crosses the low ones,
/// counts the high outliers (`value > max`). The survivors are the contiguous
/// slice `[low, len - high)` of the value-ordered samples. "No data" markers
/// sort after every measured value and are always kept.
///
/// Rejected samples get `cause` as their origin. The survivors are then
/// completed; with fewer than two left the series is only sorted
/// chronologically and its summary stays empty.
pub fn slice_outliers(series: &mut Series, min: f64, max: f64, cause: &str) -> Sliced {
    let mut samples = series.take_samples();
    samples.sort_by(|a, b| cmp_values(a.measured(), b.measured()));

    let measured = samples.iter().take_while(|s| s.measured().is_some()).count();
    let low = samples[..measured]
        .iter()
        .take_while(|s| s.measured().is_some_and(|v| v < min))
        .count();
    let high = samples[low..measured]
        .iter()
        .rev()
        .take_while(|s| s.measured().is_some_and(|v| v > max))
        .count();

    let mut rest = samples.split_off(low);
    let missing = rest.split_off(measured - low);
    let high_outliers = rest.split_off(rest.len() - high);

    let mut rejected = samples;
    rejected.extend(high_outliers.into_iter().rev());
    for s in &mut rejected {
        s.origin = Some(cause.to_string());
    }

    rest.extend(missing);
    series.replace_samples(rest);
    if series.complete().is_err() {
        series.normalize();
    }

    Sliced {
        low,
        high,
        rejected,
    }
}

/// Run one trimming pass of `policy` over `series`, stamping the audit cause
/// with `at`.
///
/// Device limits apply to a series of any length; the statistical policies
/// need at least two measured values.
///
/// # Errors
/// - `TsError::InsufficientData` when a percentile or z-score pass sees fewer
///   than two measured values.
/// - Any error from [`TrimPolicy::bounds`]. The series is untouched on error.
pub fn trim(series: &mut Series, policy: TrimPolicy, at: DateTime<Utc>) -> Result<TrimOutcome, TsError> {
    let values = series.values();
    if policy.is_statistical() && values.len() < 2 {
        return Err(TsError::insufficient(2, values.len()));
    }
    let (min, max) = policy.bounds(&values)?;
    let cause = policy.cause(min, max, at);
    let before = series.len();

    let Sliced {
        low,
        high,
        rejected,
    } = slice_outliers(series, min, max, &cause);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        policy = policy.label(),
        min,
        max,
        before,
        rejected_low = low,
        rejected_high = high,
        "trimmed series"
    );

    Ok(TrimOutcome {
        report: TrimReport {
            cause,
            min,
            max,
            before,
            rejected_low: low,
            rejected_high: high,
            kept: series.len(),
            at,
            summary: series.summary().cloned(),
        },
        rejected,
    })
}
