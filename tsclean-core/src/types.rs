//! Re-export of foundational types from `tsclean-types`.
// Consolidated re-exports so downstream crates can depend on `tsclean-core` only

pub use tsclean_types::{
    Aggregation, ExportMode, Frequency, FrequencyUnit, ParseMode, PipelineConfig, ResampleReport,
    ResetPolicy, Sample, SeriesKey, SummaryStat, TrimReport, TsError,
};
