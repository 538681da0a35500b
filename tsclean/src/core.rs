use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use tsclean_core::export::export_to_path;
use tsclean_core::{
    Aggregation, ExportMode, Frequency, ParseMode, PipelineConfig, ResampleReport, ResetPolicy,
    Series, SeriesKey, SeriesStore, TrimPolicy, TrimReport, TsError, resample_with_report, trim,
};

/// One of the four series a [`Pipeline`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The raw feed, completed once at construction and never modified.
    Original,
    /// Working copy that trimming passes narrow down.
    Cleaned,
    /// Output of the last `downsample` call.
    Resampled,
    /// Audit log of every sample a trimming pass removed, tagged with its cause.
    Rejected,
}

impl Slot {
    /// Lowercase slot name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Cleaned => "cleaned",
            Self::Resampled => "resampled",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cleaning pipeline for a single feed.
///
/// Holds the original series, a cleaned working copy, the resampled output
/// and the rejection log. Every mutating call runs to completion on `&mut
/// self`; wrap the pipeline in a [`SharedPipeline`](crate::SharedPipeline)
/// to use it from several tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    name: String,
    original: Series,
    cleaned: Series,
    resampled: Series,
    rejected: Series,
    cfg: PipelineConfig,
}

/// Builder for constructing a [`Pipeline`] with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    name: Option<String>,
    cfg: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new builder with the default configuration.
    ///
    /// Defaults mirror a permissive field deployment: lenient frequency and
    /// aggregation parsing, a rejection log that survives resets, and exports
    /// that skip unavailable destinations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the pipeline. Defaults to the original series' name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub const fn config(mut self, cfg: PipelineConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// How `downsample` parses frequency strings.
    ///
    /// - `Lenient`: unknown units and unparsable magnitudes produce a frequency
    ///   that cannot drive a grid, which `downsample` then reports as
    ///   `MalformedFrequency`.
    /// - `Strict`: the frequency string is validated up front.
    #[must_use]
    pub const fn frequency_parsing(mut self, mode: ParseMode) -> Self {
        self.cfg.frequency_parsing = mode;
        self
    }

    /// How `downsample` parses aggregation rule names.
    ///
    /// - `Lenient`: unknown names resample every bucket to "no data".
    /// - `Strict`: unknown names are rejected with `InvalidArg`.
    #[must_use]
    pub const fn aggregation_parsing(mut self, mode: ParseMode) -> Self {
        self.cfg.aggregation_parsing = mode;
        self
    }

    /// What `reset_cleaned` does to the rejection log.
    #[must_use]
    pub const fn reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.cfg.reset_policy = policy;
        self
    }

    /// Failure handling for `export`.
    #[must_use]
    pub const fn export_mode(mut self, mode: ExportMode) -> Self {
        self.cfg.export_mode = mode;
        self
    }

    /// Build a pipeline around `original`.
    ///
    /// The original is completed (sorted, deltas and summary computed) and
    /// deep-copied into the cleaned slot.
    ///
    /// # Errors
    /// Returns `InsufficientData` for fewer than two samples and
    /// `EmptyPopulation` when no sample carries a measured value.
    pub fn build(self, mut original: Series) -> Result<Pipeline, TsError> {
        original.complete()?;
        let name = self.name.unwrap_or_else(|| original.name().to_string());

        let mut cleaned = original.clone();
        cleaned.set_name(format!("{name} {}", Slot::Cleaned));
        Ok(Pipeline {
            cleaned,
            resampled: Series::new(format!("{name} {}", Slot::Resampled)),
            rejected: Series::new(format!("{name} {}", Slot::Rejected)),
            original,
            name,
            cfg: self.cfg,
        })
    }
}

impl Pipeline {
    /// Start building a new pipeline.
    ///
    /// ```
    /// use chrono::DateTime;
    /// use tsclean::{ParseMode, Pipeline, Series};
    ///
    /// let t = |s: i64| DateTime::from_timestamp(1_700_000_000 + s, 0).unwrap();
    /// let feed = Series::from_readings("boiler", [(t(0), 61.0), (t(7), 60.5), (t(12), 95.0)]);
    /// let mut pipeline = Pipeline::builder()
    ///     .frequency_parsing(ParseMode::Strict)
    ///     .build(feed)?;
    /// pipeline.device_limits_cleaning(0.0, 90.0)?;
    /// assert_eq!(pipeline.rejected().len(), 1);
    /// # Ok::<(), tsclean::TsError>(())
    /// ```
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Build a pipeline with the default configuration.
    ///
    /// # Errors
    /// Same as [`PipelineBuilder::build`].
    pub fn new(original: Series) -> Result<Self, TsError> {
        PipelineBuilder::new().build(original)
    }

    /// Load the original series from `store` and build a pipeline around it.
    ///
    /// # Errors
    /// Any error from the store, or from [`PipelineBuilder::build`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tsclean::pipeline::load",
            skip(store, key, builder),
            fields(store = store.name(), key = %key),
            err
        )
    )]
    pub async fn load(
        store: &dyn SeriesStore,
        key: &SeriesKey,
        builder: PipelineBuilder,
    ) -> Result<Self, TsError> {
        let original = store.load(key).await?;
        builder.build(original)
    }

    /// Store the series in `slot` under `key`.
    ///
    /// # Errors
    /// Any error from the store.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tsclean::pipeline::save",
            skip(self, store, key),
            fields(pipeline = %self.name, store = store.name(), key = %key),
            err
        )
    )]
    pub async fn save(
        &self,
        store: &dyn SeriesStore,
        slot: Slot,
        key: &SeriesKey,
    ) -> Result<(), TsError> {
        store.save(key, self.slot(slot)).await
    }

    /// Pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    /// The raw feed. There is no mutable access to it.
    #[must_use]
    pub const fn original(&self) -> &Series {
        &self.original
    }

    /// The cleaned working copy.
    #[must_use]
    pub const fn cleaned(&self) -> &Series {
        &self.cleaned
    }

    /// The output of the last `downsample` call; empty before the first one.
    #[must_use]
    pub const fn resampled(&self) -> &Series {
        &self.resampled
    }

    /// Every sample removed by a trimming pass, in removal order.
    #[must_use]
    pub const fn rejected(&self) -> &Series {
        &self.rejected
    }

    /// The series held in `slot`.
    #[must_use]
    pub const fn slot(&self, slot: Slot) -> &Series {
        match slot {
            Slot::Original => &self.original,
            Slot::Cleaned => &self.cleaned,
            Slot::Resampled => &self.resampled,
            Slot::Rejected => &self.rejected,
        }
    }

    /// Drop every sample outside the `p` and `1 - p` quantiles of the
    /// cleaned values.
    ///
    /// # Errors
    /// `InvalidArg` unless `0 < p < 0.5`; `InsufficientData` when fewer than
    /// two measured values remain.
    pub fn percentile_cleaning(&mut self, p: f64) -> Result<TrimReport, TsError> {
        self.clean(TrimPolicy::Percentile { p })
    }

    /// Drop every sample outside `(mean - std) * level ..= (mean + std) * level`
    /// of the cleaned values.
    ///
    /// # Errors
    /// `InvalidArg` for a non-positive level; `InsufficientData` when fewer
    /// than two measured values remain.
    pub fn zscore_cleaning(&mut self, level: f64) -> Result<TrimReport, TsError> {
        self.clean(TrimPolicy::ZScore { level })
    }

    /// Drop every sample outside the device's physical range.
    ///
    /// # Errors
    /// `InvalidArg` when `min > max` or either limit is not finite.
    pub fn device_limits_cleaning(&mut self, min: f64, max: f64) -> Result<TrimReport, TsError> {
        self.clean(TrimPolicy::DeviceLimits { min, max })
    }

    /// Run one trimming pass on the cleaned series, stamped with the current time.
    ///
    /// # Errors
    /// See [`trim`](tsclean_core::trim).
    pub fn clean(&mut self, policy: TrimPolicy) -> Result<TrimReport, TsError> {
        self.clean_at(policy, Utc::now())
    }

    /// Run one trimming pass on the cleaned series and append the removed
    /// samples to the rejection log. Passes compose: each one reads the
    /// cleaned series the previous one left.
    ///
    /// # Errors
    /// See [`trim`](tsclean_core::trim). Nothing changes on error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tsclean::pipeline::clean",
            skip(self),
            fields(pipeline = %self.name, kind = policy.label()),
            err
        )
    )]
    pub fn clean_at(&mut self, policy: TrimPolicy, at: DateTime<Utc>) -> Result<TrimReport, TsError> {
        let outcome = trim(&mut self.cleaned, policy, at)?;
        self.rejected.extend(outcome.rejected);
        Ok(outcome.report)
    }

    /// Discard all cleaning: the resampled series is emptied and the cleaned
    /// series becomes a fresh copy of the original. The rejection log follows
    /// the configured [`ResetPolicy`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tsclean::pipeline::reset_cleaned", skip(self), fields(pipeline = %self.name))
    )]
    pub fn reset_cleaned(&mut self) {
        self.resampled.clear();
        let name = self.cleaned.name().to_string();
        self.cleaned = self.original.clone();
        self.cleaned.set_name(name);
        if self.cfg.reset_policy == ResetPolicy::ClearRejected {
            self.rejected.clear();
        }
    }

    /// Resample the cleaned series onto a grid of `frequency` using the
    /// aggregation rule named `rule`, both parsed per the configuration.
    ///
    /// The resampled series is rebuilt from scratch on every call.
    ///
    /// # Errors
    /// - `MalformedFrequency` for a frequency string that does not parse (strict)
    ///   or does not advance time (either mode).
    /// - `InvalidArg` for an unknown rule under strict aggregation parsing.
    /// - `InsufficientData` when the cleaned series is empty.
    ///
    /// The resampled series is left empty on error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tsclean::pipeline::downsample",
            skip(self),
            fields(pipeline = %self.name),
            err
        )
    )]
    pub fn downsample(&mut self, frequency: &str, rule: &str) -> Result<ResampleReport, TsError> {
        self.resampled.clear();
        let frequency = Frequency::parse(frequency, self.cfg.frequency_parsing)?;
        let rule = Aggregation::parse(rule, self.cfg.aggregation_parsing)?;
        self.downsample_with(&frequency, &rule)
    }

    /// [`downsample`](Self::downsample) with already parsed parameters.
    ///
    /// # Errors
    /// See [`resample_with_report`](tsclean_core::resample_with_report). The
    /// resampled series is left empty on error.
    pub fn downsample_with(
        &mut self,
        frequency: &Frequency,
        rule: &Aggregation,
    ) -> Result<ResampleReport, TsError> {
        self.resampled.clear();
        let (mut out, report) = resample_with_report(&self.cleaned, frequency, rule)?;
        out.set_name(format!("{} {}", self.name, Slot::Resampled));
        self.resampled = out;
        Ok(report)
    }

    /// Write the series in `slot` to `path`, one line per sample.
    ///
    /// Returns whether the file was written; see
    /// [`export_to_path`](tsclean_core::export::export_to_path).
    ///
    /// # Errors
    /// `Io` on write failures, or when the destination cannot be opened under
    /// `ExportMode::Strict`.
    pub fn export(&self, slot: Slot, path: impl AsRef<Path>) -> Result<bool, TsError> {
        export_to_path(self.slot(slot), path, self.cfg.export_mode)
    }
}
