//! Plain-text tables for series and summaries.
//!
//! ```
//! use chrono::DateTime;
//! use tsclean_core::Series;
//! use tsclean_core::report::SeriesTable;
//!
//! let t = |s| DateTime::from_timestamp(s, 0).unwrap();
//! let mut series = Series::from_readings("sensor", [(t(0), 1.5), (t(10), 2.0)]);
//! series.complete().unwrap();
//! let text = SeriesTable::new(&series).to_string();
//! assert!(text.contains("2.0000"));
//! ```

use std::fmt;
use std::ops::Range;

use chrono::TimeDelta;

use crate::{Series, SummaryStat};

const MISSING: &str = "-";

/// Renders index, timestamp, value, delta time and delta value per sample.
#[derive(Debug, Clone)]
pub struct SeriesTable<'a> {
    series: &'a Series,
    rows: Option<Range<usize>>,
}

impl<'a> SeriesTable<'a> {
    /// Table of every sample of `series`.
    #[must_use]
    pub const fn new(series: &'a Series) -> Self {
        Self { series, rows: None }
    }

    /// Restrict the table to the sample indices in `rows`, clamped to the series length.
    #[must_use]
    pub fn rows(mut self, rows: Range<usize>) -> Self {
        self.rows = Some(rows);
        self
    }
}

impl fmt::Display for SeriesTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let samples = self.series.samples();
        let range = self.rows.clone().unwrap_or(0..samples.len());
        let end = range.end.min(samples.len());
        let start = range.start.min(end);

        writeln!(f, "{}", self.series.name())?;
        writeln!(
            f,
            "{:>6}  {:<25}  {:>14}  {:>14}  {:>14}",
            "#", "timestamp", "value", "dt (s)", "dv"
        )?;
        for (i, s) in samples[start..end].iter().enumerate() {
            writeln!(
                f,
                "{:>6}  {:<25}  {:>14}  {:>14}  {:>14}",
                start + i,
                s.ts.to_rfc3339(),
                cell(s.measured()),
                seconds(s.delta_time),
                cell(s.delta_value),
            )?;
        }
        Ok(())
    }
}

/// Renders count, minimum, maximum, mean and standard deviation of a summary.
#[derive(Debug, Clone, Copy)]
pub struct SummaryTable<'a> {
    summary: &'a SummaryStat,
}

impl<'a> SummaryTable<'a> {
    /// Table for `summary`.
    #[must_use]
    pub const fn new(summary: &'a SummaryStat) -> Self {
        Self { summary }
    }
}

impl fmt::Display for SummaryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        writeln!(f, "{:<10} {}", "count", s.count)?;
        writeln!(f, "{:<10} {} .. {}", "span", s.ts_min.to_rfc3339(), s.ts_max.to_rfc3339())?;
        writeln!(f, "{:<10} {:.4}", "min", s.value_min)?;
        writeln!(f, "{:<10} {:.4}", "max", s.value_max)?;
        writeln!(f, "{:<10} {:.4}", "mean", s.value_mean)?;
        writeln!(f, "{:<10} {:.4}", "std", s.value_std)?;
        writeln!(
            f,
            "{:<10} {}",
            "gap mean",
            s.gap_mean.map_or_else(|| MISSING.to_string(), seconds)
        )?;
        writeln!(
            f,
            "{:<10} {}",
            "gap std",
            s.gap_std.map_or_else(|| MISSING.to_string(), seconds)
        )
    }
}

fn cell(v: Option<f64>) -> String {
    v.map_or_else(|| MISSING.to_string(), |v| format!("{v:.4}"))
}

fn seconds(d: TimeDelta) -> String {
    d.num_microseconds().map_or_else(
        || format!("{}", d.num_seconds()),
        |us| format!("{:.3}", us as f64 / 1e6),
    )
}
