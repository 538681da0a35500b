//! Time-series utilities built on [`Series`](crate::Series).
//!
//! Modules include:
//! - `resample`: aggregate a series onto a fixed grid, marking empty buckets
/// Fixed-interval resampling with explicit gap buckets.
pub mod resample;
