//! Shared tsclean data types: samples, summary statistics, frequency specifications,
//! aggregation rules, pipeline configuration and the unified error type.
#![warn(missing_docs)]

mod aggregation;
mod config;
mod error;
mod frequency;
mod key;
mod reports;
mod sample;

pub use aggregation::Aggregation;
pub use config::{ExportMode, ParseMode, PipelineConfig, ResetPolicy};
pub use error::TsError;
pub use frequency::{Frequency, FrequencyUnit};
pub use key::SeriesKey;
pub use reports::{ResampleReport, TrimReport};
pub use sample::{Sample, SummaryStat};
