use std::cmp::Ordering;

use chrono::{DateTime, TimeDelta, Utc};

use crate::stats;
use crate::{Sample, SummaryStat, TsError};

/// An ordered collection of samples with a description and a cached summary.
///
/// Samples may be added in any order; [`complete`](Self::complete) is the
/// single normalization entry point that sorts chronologically, refreshes every
/// sample's deltas and recomputes the summary. Any operation that changes
/// membership or order drops the cached summary until the next `complete`.
///
/// `Clone` copies the sample storage, so a cloned series can be mutated
/// without affecting the source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    name: String,
    samples: Vec<Sample>,
    summary: Option<SummaryStat>,
}

impl Series {
    /// An empty series with the given name or description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            samples: Vec::new(),
            summary: None,
        }
    }

    /// A series holding `samples` in the given order.
    pub fn from_samples(name: impl Into<String>, samples: impl IntoIterator<Item = Sample>) -> Self {
        Self {
            name: name.into(),
            samples: samples.into_iter().collect(),
            summary: None,
        }
    }

    /// A series of raw measured samples built from `(timestamp, value)` pairs.
    pub fn from_readings(
        name: impl Into<String>,
        readings: impl IntoIterator<Item = (DateTime<Utc>, f64)>,
    ) -> Self {
        Self::from_samples(
            name,
            readings.into_iter().map(|(ts, v)| Sample::new(ts, v)),
        )
    }

    /// Name or description.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the name or description.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The samples in their current order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Consume the series, returning its samples.
    #[must_use]
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    /// Number of samples, "no data" markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First sample in the current order.
    #[must_use]
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    /// Last sample in the current order.
    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Summary cached by the last successful `complete` or `compute_summary`.
    #[must_use]
    pub const fn summary(&self) -> Option<&SummaryStat> {
        self.summary.as_ref()
    }

    /// Append a sample. Ordering is not enforced: feeds may deliver out of order.
    pub fn add(&mut self, sample: Sample) {
        self.samples.push(sample);
        self.summary = None;
    }

    /// Remove every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.summary = None;
    }

    /// Stable chronological sort, oldest first.
    pub fn sort_ascending(&mut self) {
        self.samples.sort_by_key(|s| s.ts);
        self.summary = None;
    }

    /// Stable chronological sort, newest first.
    pub fn sort_descending(&mut self) {
        self.samples.sort_by(|a, b| b.ts.cmp(&a.ts));
        self.summary = None;
    }

    /// Stable sort by ascending value. "No data" markers sort last.
    pub fn sort_by_value(&mut self) {
        self.samples.sort_by(|a, b| cmp_values(a.measured(), b.measured()));
        self.summary = None;
    }

    /// Sort chronologically, refresh every sample's deltas against its
    /// predecessor and recompute the summary.
    ///
    /// # Errors
    /// Returns `TsError::InsufficientData` when the series has fewer than two
    /// samples (the series is left untouched), or `TsError::EmptyPopulation`
    /// when none of its samples is measured.
    pub fn complete(&mut self) -> Result<&SummaryStat, TsError> {
        if self.samples.len() < 2 {
            return Err(TsError::insufficient(2, self.samples.len()));
        }
        self.sort_ascending();
        self.refresh_deltas();
        self.compute_summary()
    }

    /// Sort chronologically and refresh deltas. Works on any length and
    /// leaves the summary cleared.
    pub(crate) fn normalize(&mut self) {
        self.sort_ascending();
        self.refresh_deltas();
    }

    fn refresh_deltas(&mut self) {
        let mut prev: Option<(DateTime<Utc>, Option<f64>)> = None;
        for s in &mut self.samples {
            match prev {
                None => {
                    s.delta_time = TimeDelta::zero();
                    s.delta_value = s.measured().map(|_| 0.0);
                }
                Some((pts, pv)) => {
                    s.delta_time = s.ts - pts;
                    s.delta_value = s.measured().zip(pv).map(|(v, p)| v - p);
                }
            }
            prev = Some((s.ts, s.measured()));
        }
    }

    /// Recompute the cached summary from the current samples and deltas.
    ///
    /// Gap statistics read each sample's `delta_time`, so they are only
    /// meaningful after [`complete`](Self::complete). The gap mean divides the
    /// summed gaps by `count - 2` while the gap standard deviation averages
    /// over all `count` positions; both divisors are kept as they are.
    ///
    /// # Errors
    /// Returns `TsError::InsufficientData` for fewer than two samples and
    /// `TsError::EmptyPopulation` when no sample is measured. The cached
    /// summary is cleared on error.
    pub fn compute_summary(&mut self) -> Result<&SummaryStat, TsError> {
        self.summary = None;
        let count = self.samples.len();
        if count < 2 {
            return Err(TsError::insufficient(2, count));
        }

        let values = self.values();
        let (value_min, value_max) =
            stats::bounds(&values).ok_or_else(|| TsError::empty_population("series values"))?;
        let value_mean = stats::mean(&values).unwrap_or(value_min);
        let value_std = stats::population_std_dev(&values).unwrap_or(0.0);

        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for s in &self.samples[1..] {
            let g = micros(s.delta_time);
            sum += g;
            sum_sq += g * g;
        }
        let gap_mean = (count > 2).then(|| sum / (count - 2) as f64);
        let e_x = sum / count as f64;
        let e_x2 = sum_sq / count as f64;
        let gap_std = (e_x2 - e_x * e_x).max(0.0).sqrt();

        let ts_min = self.samples.iter().map(|s| s.ts).min();
        let ts_max = self.samples.iter().map(|s| s.ts).max();
        let (Some(ts_min), Some(ts_max)) = (ts_min, ts_max) else {
            return Err(TsError::insufficient(2, count));
        };

        Ok(&*self.summary.insert(SummaryStat {
            count,
            ts_min,
            ts_max,
            gap_mean: gap_mean.and_then(from_micros),
            gap_std: from_micros(gap_std),
            value_min,
            value_max,
            value_mean,
            value_std,
        }))
    }

    /// Measured values in the current order; "no data" markers and
    /// non-finite values are skipped.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().filter_map(Sample::measured).collect()
    }

    /// Every sample's value in the current order, markers included as `None`.
    #[must_use]
    pub fn readings(&self) -> Vec<Option<f64>> {
        self.samples.iter().map(Sample::measured).collect()
    }

    /// Timestamps in the current order.
    #[must_use]
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.samples.iter().map(|s| s.ts).collect()
    }

    /// A new series holding the samples of `a` followed by those of `b`.
    ///
    /// The result is not normalized; call [`complete`](Self::complete) on it.
    #[must_use]
    pub fn merge(a: &Self, b: &Self) -> Self {
        Self::from_samples(
            format!("{}+{}", a.name, b.name),
            a.samples.iter().chain(b.samples.iter()).cloned(),
        )
    }

    /// Remove the sample at `index` by swapping in the last one, then restore
    /// chronological order. Returns `None` if `index` is out of range.
    pub fn swap_remove(&mut self, index: usize) -> Option<Sample> {
        if index >= self.samples.len() {
            return None;
        }
        let removed = self.samples.swap_remove(index);
        self.sort_ascending();
        Some(removed)
    }

    /// Remove every "no data" marker, returning how many were removed.
    pub fn drop_missing(&mut self) -> usize {
        let before = self.samples.len();
        self.samples.retain(|s| !s.is_missing());
        let removed = before - self.samples.len();
        if removed > 0 {
            self.summary = None;
        }
        removed
    }

    pub(crate) fn take_samples(&mut self) -> Vec<Sample> {
        self.summary = None;
        std::mem::take(&mut self.samples)
    }

    pub(crate) fn replace_samples(&mut self, samples: Vec<Sample>) {
        self.samples = samples;
        self.summary = None;
    }
}

impl Extend<Sample> for Series {
    fn extend<I: IntoIterator<Item = Sample>>(&mut self, iter: I) {
        self.samples.extend(iter);
        self.summary = None;
    }
}

pub(crate) fn cmp_values(a: Option<f64>, b: Option<f64>) -> Ordering {
    let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
    match (finite(a), finite(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn micros(d: TimeDelta) -> f64 {
    d.num_microseconds().map_or(f64::MAX, |us| us as f64)
}

#[allow(clippy::cast_possible_truncation)]
fn from_micros(us: f64) -> Option<TimeDelta> {
    us.is_finite().then(|| TimeDelta::microseconds(us.round() as i64))
}
