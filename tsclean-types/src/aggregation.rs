use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ParseMode;
use crate::error::TsError;

/// Rule used to reduce the samples of one resampling bucket to a single value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregation {
    /// Mean of the bucket's values.
    Avg,
    /// Largest value.
    Max,
    /// Smallest value.
    Min,
    /// Chronologically last value.
    Last,
    /// A rule name that was not recognized. Every bucket aggregated with it
    /// yields "no data".
    Unrecognized(String),
}

impl Aggregation {
    /// Map a rule name to a rule, keeping unknown names as `Unrecognized`.
    #[must_use]
    pub fn lenient(name: &str) -> Self {
        match name {
            "avg" => Self::Avg,
            "max" => Self::Max,
            "min" => Self::Min,
            "last" => Self::Last,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Parse a rule name under the given mode.
    ///
    /// # Errors
    /// Returns `TsError::InvalidArg` in `Strict` mode for names other than
    /// `avg`, `max`, `min` and `last`.
    pub fn parse(name: &str, mode: ParseMode) -> Result<Self, TsError> {
        match mode {
            ParseMode::Lenient => Ok(Self::lenient(name)),
            ParseMode::Strict => name.parse(),
        }
    }

    /// The rule name as written in configuration.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Avg => "avg",
            Self::Max => "max",
            Self::Min => "min",
            Self::Last => "last",
            Self::Unrecognized(name) => name,
        }
    }
}

impl FromStr for Aggregation {
    type Err = TsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::lenient(s) {
            Self::Unrecognized(name) => Err(TsError::InvalidArg(format!(
                "unknown aggregation rule {name:?}; expected one of avg, max, min, last"
            ))),
            known => Ok(known),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
