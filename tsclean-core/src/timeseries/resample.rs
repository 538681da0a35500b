use chrono::{DateTime, TimeDelta, Utc};

use crate::{Aggregation, Frequency, ResampleReport, Sample, Series, TsError};

/// Origin tag of buckets no source sample fell into.
pub const GAP_ORIGIN: &str = "gap";

/// Running aggregate of one bucket's working set.
#[derive(Default)]
struct BucketAgg {
    consumed: usize,
    measured: usize,
    mean: f64,
    min: f64,
    max: f64,
    last: Option<f64>,
}

impl BucketAgg {
    fn push(&mut self, value: Option<f64>) {
        self.consumed += 1;
        let Some(v) = value else {
            return;
        };
        if self.measured == 0 {
            self.min = v;
            self.max = v;
        } else {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
        self.measured += 1;
        self.mean += (v - self.mean) / self.measured as f64;
        self.last = Some(v);
    }

    fn finish(&self, rule: &Aggregation) -> Option<f64> {
        if self.measured == 0 {
            return None;
        }
        match rule {
            Aggregation::Avg => Some(self.mean),
            Aggregation::Max => Some(self.max),
            Aggregation::Min => Some(self.min),
            Aggregation::Last => self.last,
            Aggregation::Unrecognized(_) => None,
        }
    }
}

fn emit(
    out: &mut Series,
    report: &mut ResampleReport,
    edge: DateTime<Utc>,
    value: Option<f64>,
    origin: &str,
) {
    report.buckets += 1;
    if value.is_none() {
        report.gaps += 1;
    }
    out.add(
        Sample {
            value,
            ..Sample::missing(edge)
        }
        .with_origin(origin),
    );
}

/// Resample `series` onto the grid defined by `frequency`, reducing each
/// bucket with `aggregation`.
///
/// See [`resample_with_report`] for the bucket semantics.
///
/// # Errors
/// Same as [`resample_with_report`].
pub fn resample(
    series: &Series,
    frequency: &Frequency,
    aggregation: &Aggregation,
) -> Result<Series, TsError> {
    resample_with_report(series, frequency, aggregation).map(|(out, _)| out)
}

/// Resample `series` and report how many buckets and gaps were emitted.
///
/// - Samples are processed in chronological order; the input is not modified.
/// - The first bucket's exclusive upper edge is
///   `frequency.advance(frequency.round_start(first.ts))`.
/// - Each bucket is timestamped at its upper edge and holds the aggregate of
///   the samples strictly before that edge. Buckets with no samples, with only
///   "no data" markers, or reduced by an unrecognized rule hold no value.
/// - Empty buckets between two populated ones are emitted one per interval, so
///   the output grid has no holes; they carry the [`GAP_ORIGIN`] tag.
/// - The output is completed when it has at least two buckets.
///
/// # Errors
/// - `TsError::InsufficientData` when `series` is empty.
/// - `TsError::MalformedFrequency` when `frequency` does not advance time.
/// - `TsError::InvalidArg` when the grid would run past the representable range.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip(series),
        fields(series = series.name(), len = series.len()),
        err
    )
)]
pub fn resample_with_report(
    series: &Series,
    frequency: &Frequency,
    aggregation: &Aggregation,
) -> Result<(Series, ResampleReport), TsError> {
    if series.is_empty() {
        return Err(TsError::insufficient(1, 0));
    }
    let step = frequency
        .interval()
        .filter(|d| *d > TimeDelta::zero())
        .ok_or_else(|| TsError::MalformedFrequency(format!("{frequency} does not advance time")))?;
    let next = |edge: DateTime<Utc>| {
        edge.checked_add_signed(step)
            .ok_or_else(|| TsError::InvalidArg(format!("bucket edge overflow after {edge}")))
    };

    let mut sorted: Vec<&Sample> = series.samples().iter().collect();
    sorted.sort_by_key(|s| s.ts);
    let Some(first) = sorted.first() else {
        return Err(TsError::insufficient(1, 0));
    };

    let tag = format!("resampled {frequency} {aggregation}");
    let mut out = Series::new(format!("{} {tag}", series.name()));
    let mut report = ResampleReport {
        frequency: *frequency,
        aggregation: aggregation.to_string(),
        consumed: 0,
        buckets: 0,
        gaps: 0,
    };
    let mut edge = next(frequency.round_start(first.ts))?;
    let mut rest = sorted.as_slice();
    while !rest.is_empty() {
        let taken = rest.iter().take_while(|s| s.ts < edge).count();
        let mut agg = BucketAgg::default();
        for s in &rest[..taken] {
            agg.push(s.measured());
        }
        rest = &rest[taken..];

        if agg.consumed == 0 {
            emit(&mut out, &mut report, edge, None, GAP_ORIGIN);
        } else {
            emit(&mut out, &mut report, edge, agg.finish(aggregation), &tag);
        }
        edge = next(edge)?;

        while rest.first().is_some_and(|s| s.ts >= edge) {
            emit(&mut out, &mut report, edge, None, GAP_ORIGIN);
            edge = next(edge)?;
        }
        report.consumed += agg.consumed;
    }

    if out.len() >= 2 && out.complete().is_err() {
        // every bucket is a gap: keep the grid, no summary
        out.sort_ascending();
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        buckets = report.buckets,
        gaps = report.gaps,
        consumed = report.consumed,
        "resampled series"
    );

    Ok((out, report))
}
