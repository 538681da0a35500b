//! In-memory [`SeriesStore`] for CI-safe tests and examples.
//!
//! Special keys:
//! - `"FAIL"` always fails with a `Store` error.
//! - keys without content fail with `NotFound`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tsclean_core::{Series, SeriesKey, SeriesStore, TsError};

pub mod fixtures;

/// Instruction for how calls on a key should behave.
#[derive(Debug, Clone)]
pub enum StoreBehavior {
    /// Serve and accept data normally.
    Normal,
    /// Fail every `load` and `save` with the provided error.
    Fail(TsError),
}

/// Mock store keeping series in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    series: RwLock<HashMap<SeriesKey, Series>>,
    rules: RwLock<HashMap<SeriesKey, StoreBehavior>>,
}

impl MemoryStore {
    const NAME: &'static str = "tsclean-mock";

    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with the `boiler`, `greenhouse` and `sparse` fixtures.
    #[must_use]
    pub fn with_fixtures() -> Self {
        let series = ["boiler", "greenhouse", "sparse"]
            .into_iter()
            .filter_map(|k| fixtures::by_key(k).map(|s| (SeriesKey::new(k), s)))
            .collect();
        Self {
            series: RwLock::new(series),
            rules: RwLock::default(),
        }
    }

    /// Put `series` under `key`.
    pub async fn insert(&self, key: SeriesKey, series: Series) {
        self.series.write().await.insert(key, series);
    }

    /// Copy of the series under `key`, bypassing behavior rules.
    pub async fn get(&self, key: &SeriesKey) -> Option<Series> {
        self.series.read().await.get(key).cloned()
    }

    /// Number of stored series.
    pub async fn len(&self) -> usize {
        self.series.read().await.len()
    }

    /// Whether the store holds no series.
    pub async fn is_empty(&self) -> bool {
        self.series.read().await.is_empty()
    }

    /// Set the behavior for calls on `key`.
    pub async fn set_behavior(&self, key: SeriesKey, behavior: StoreBehavior) {
        self.rules.write().await.insert(key, behavior);
    }

    /// Remove every behavior rule.
    pub async fn clear_behaviors(&self) {
        self.rules.write().await.clear();
    }

    async fn check(&self, key: &SeriesKey, op: &'static str) -> Result<(), TsError> {
        if key.as_str() == "FAIL" {
            return Err(TsError::store(Self::NAME, format!("forced failure: {op}")));
        }
        match self.rules.read().await.get(key) {
            Some(StoreBehavior::Fail(e)) => Err(e.clone()),
            Some(StoreBehavior::Normal) | None => Ok(()),
        }
    }
}

#[async_trait]
impl SeriesStore for MemoryStore {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn load(&self, key: &SeriesKey) -> Result<Series, TsError> {
        self.check(key, "load").await?;
        self.get(key)
            .await
            .ok_or_else(|| TsError::not_found(format!("series for {key}")))
    }

    async fn save(&self, key: &SeriesKey, series: &Series) -> Result<(), TsError> {
        self.check(key, "save").await?;
        self.insert(key.clone(), series.clone()).await;
        Ok(())
    }
}
