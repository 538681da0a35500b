use async_trait::async_trait;

use crate::{Series, SeriesKey, TsError};

/// Persistence collaborator: loads a raw feed and stores processed series.
///
/// No backing store is implied. Implementations report their own failures
/// through `TsError::Store` and missing keys through `TsError::NotFound`.
#[async_trait]
pub trait SeriesStore: Send + Sync {
    /// Stable identifier used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Load the series stored under `key`.
    async fn load(&self, key: &SeriesKey) -> Result<Series, TsError>;

    /// Store `series` under `key`, replacing any previous content.
    async fn save(&self, key: &SeriesKey, series: &Series) -> Result<(), TsError>;
}
