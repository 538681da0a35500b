//! Configuration types for the cleaning pipeline.

use serde::{Deserialize, Serialize};

/// How textual parameters (frequency specs, aggregation names) are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ParseMode {
    /// Never fail: malformed input degrades to a no-op frequency or an
    /// unrecognized aggregation that yields "no data".
    #[default]
    Lenient,
    /// Reject anything outside the documented grammar.
    Strict,
}

/// What resetting the cleaned series does to the rejection log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ResetPolicy {
    /// Keep every rejected sample; the audit log survives resets.
    #[default]
    KeepRejected,
    /// Clear the rejection log together with the cleaned and resampled series.
    ClearRejected,
}

/// Failure handling for flat-file export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ExportMode {
    /// A destination that cannot be opened is skipped silently.
    #[default]
    Lenient,
    /// Surface open and write failures as errors.
    Strict,
}

/// Configuration for a cleaning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Parsing of frequency specifications passed to `downsample`.
    pub frequency_parsing: ParseMode,
    /// Parsing of aggregation rule names passed to `downsample`.
    pub aggregation_parsing: ParseMode,
    /// Effect of `reset_cleaned` on the rejection log.
    pub reset_policy: ResetPolicy,
    /// Failure handling for `export`.
    pub export_mode: ExportMode,
}
