use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tsclean_core::{ResampleReport, Series, SeriesKey, SeriesStore, TrimPolicy, TrimReport, TsError};

use crate::core::{Pipeline, Slot};

/// A [`Pipeline`] shared between tasks.
///
/// Every call takes the pipeline's lock for its whole duration, so trimming
/// passes, resets and resampling on the same feed never interleave. Clones
/// share the same pipeline; use one `SharedPipeline` per feed.
#[derive(Debug, Clone)]
pub struct SharedPipeline {
    inner: Arc<Mutex<Pipeline>>,
}

impl SharedPipeline {
    /// Wrap `pipeline` for shared use.
    #[must_use]
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pipeline)),
        }
    }

    /// Exclusive access for a sequence of calls that must not interleave
    /// with other tasks.
    pub async fn lock(&self) -> MutexGuard<'_, Pipeline> {
        self.inner.lock().await
    }

    /// Run one trimming pass under the lock.
    ///
    /// # Errors
    /// See [`Pipeline::clean`].
    pub async fn clean(&self, policy: TrimPolicy) -> Result<TrimReport, TsError> {
        self.inner.lock().await.clean(policy)
    }

    /// Reset the cleaned series under the lock.
    pub async fn reset_cleaned(&self) {
        self.inner.lock().await.reset_cleaned();
    }

    /// Resample under the lock.
    ///
    /// # Errors
    /// See [`Pipeline::downsample`].
    pub async fn downsample(&self, frequency: &str, rule: &str) -> Result<ResampleReport, TsError> {
        self.inner.lock().await.downsample(frequency, rule)
    }

    /// Deep copy of the series in `slot`.
    pub async fn snapshot(&self, slot: Slot) -> Series {
        self.inner.lock().await.slot(slot).clone()
    }

    /// Store the series in `slot` under `key`.
    ///
    /// The slot is copied under the lock and stored after releasing it, so a
    /// slow store does not block other callers.
    ///
    /// # Errors
    /// Any error from the store.
    pub async fn save(
        &self,
        store: &dyn SeriesStore,
        slot: Slot,
        key: &SeriesKey,
    ) -> Result<(), TsError> {
        let series = self.snapshot(slot).await;
        store.save(key, &series).await
    }

    /// Unwrap the pipeline if this is the last handle, otherwise return `self`.
    ///
    /// # Errors
    /// Returns `self` unchanged while other clones exist.
    pub fn try_into_inner(self) -> Result<Pipeline, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<Pipeline> for SharedPipeline {
    fn from(pipeline: Pipeline) -> Self {
        Self::new(pipeline)
    }
}
