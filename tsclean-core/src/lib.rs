//! tsclean-core
//!
//! Algorithms for turning an irregular, out-of-order sensor feed into a clean,
//! regularly spaced series.
//!
//! - `series`: the ordered sample container with derived deltas and cached
//!   summary statistics.
//! - `stats`: mean / variance / bounds / quantile primitives on plain slices.
//! - `trim`: percentile, z-score and device-limit outlier trimming.
//! - `timeseries`: fixed-interval resampling with explicit gap buckets.
//! - `store`: the persistence collaborator trait.
//! - `export` and `report`: flat-file and tabular renderings of a series.
//!
//! Everything here is synchronous and single-threaded; a series is mutated in
//! place and needs exclusive access while an operation runs.
#![warn(missing_docs)]

/// Flat-file export of a series.
pub mod export;
/// Tabular rendering of series and summaries.
pub mod report;
/// Ordered sample container.
pub mod series;
/// Statistics primitives on numeric slices.
pub mod stats;
/// Persistence collaborator trait.
pub mod store;
/// Resampling onto a fixed time grid.
pub mod timeseries;
/// Outlier trimming policies.
pub mod trim;
pub mod types;

pub use series::Series;
pub use store::SeriesStore;
pub use timeseries::resample::{resample, resample_with_report};
pub use trim::{TrimOutcome, TrimPolicy, slice_outliers, trim};
pub use types::*;
