//! tsclean cleans irregular IoT sensor feeds.
//!
//! Overview
//! - A [`Pipeline`] holds four series per feed: the original readings, a
//!   cleaned working copy, the resampled output and a rejection log.
//! - Trimming passes (percentile, z-score, device limits) narrow the cleaned
//!   copy down and append what they remove, tagged with an audit cause, to the
//!   rejection log. Passes compose.
//! - `downsample` aggregates the cleaned copy onto a fixed grid (`"30s"`,
//!   `"5m"`, `"2h"`, `"1d"`) with `avg`, `max`, `min` or `last`, emitting an
//!   explicit "no data" bucket for every empty interval instead of
//!   interpolating.
//! - [`SharedPipeline`] serializes calls from several tasks on one feed.
//!
//! Key behaviors and trade-offs
//! - Parsing: lenient by default. An unknown frequency unit or aggregation
//!   rule degrades instead of failing; strict modes reject them up front.
//! - Reset: the rejection log survives `reset_cleaned` unless
//!   `ResetPolicy::ClearRejected` is configured.
//! - Export: an unavailable destination is skipped silently unless
//!   `ExportMode::Strict` is configured.
//! - Day frequencies anchor the grid on the first reading instead of calendar
//!   midnight, so the first day bucket is always empty.
//!
//! Examples
//! Cleaning and resampling a feed:
//! ```rust
//! use chrono::DateTime;
//! use tsclean::{Pipeline, Series};
//!
//! let t = |s: i64| DateTime::from_timestamp(1_699_999_200 + s, 0).unwrap();
//! let feed = Series::from_readings(
//!     "greenhouse-3",
//!     [(t(0), 21.5), (t(4), 21.7), (t(9), -40.0), (t(31), 21.9)],
//! );
//! let mut pipeline = Pipeline::new(feed)?;
//! let report = pipeline.device_limits_cleaning(-20.0, 60.0)?;
//! assert_eq!(report.rejected(), 1);
//!
//! let buckets = pipeline.downsample("10s", "avg")?;
//! assert_eq!(buckets.gaps, 2);
//! # Ok::<(), tsclean::TsError>(())
//! ```
//!
//! Sharing a pipeline between tasks:
//! ```rust,ignore
//! let shared = tsclean::SharedPipeline::new(pipeline);
//! let worker = shared.clone();
//! tokio::spawn(async move { worker.clean(TrimPolicy::ZScore { level: 2.0 }).await });
//! let cleaned = shared.snapshot(Slot::Cleaned).await;
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod shared;

pub use crate::core::{Pipeline, PipelineBuilder, Slot};
pub use shared::SharedPipeline;

pub use tsclean_core::export::{export_to_path, write_series};
pub use tsclean_core::report::{SeriesTable, SummaryTable};
pub use tsclean_core::{
    Series, SeriesStore, TrimOutcome, TrimPolicy, resample, resample_with_report, stats, trim,
};

// Re-export foundational types for convenience
pub use tsclean_types::{
    Aggregation, ExportMode, Frequency, FrequencyUnit, ParseMode, PipelineConfig, ResampleReport,
    ResetPolicy, Sample, SeriesKey, SummaryStat, TrimReport, TsError,
};
