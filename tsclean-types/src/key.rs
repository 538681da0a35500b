//! Store key types usable across crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key identifying a series in a persistence collaborator, typically one per
/// device or feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesKey(String);

impl SeriesKey {
    /// Construct a key from a feed name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SeriesKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
