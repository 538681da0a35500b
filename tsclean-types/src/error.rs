use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tsclean workspace.
///
/// Statistical failures (empty populations, degenerate series) are ordinary,
/// recoverable results: every entry point that would otherwise index into a
/// too-short series reports one of these instead.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TsError {
    /// A mean was requested over zero measured observations.
    #[error("population is empty: {what}")]
    EmptyPopulation {
        /// Description of the population, e.g. "series values".
        what: String,
    },

    /// The series is too short for the requested operation.
    #[error("insufficient data: needed at least {needed} samples, found {found}")]
    InsufficientData {
        /// Minimum number of samples the operation requires.
        needed: usize,
        /// Number of samples actually present.
        found: usize,
    },

    /// A frequency specification did not match `<digits><s|m|h|d>`, or cannot
    /// drive a resampling grid (zero magnitude, unknown unit).
    #[error("malformed frequency specification: {0:?}")]
    MalformedFrequency(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A series could not be found in a store.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "series boiler-7".
        what: String,
    },

    /// A persistence collaborator returned an error.
    #[error("{store} failed: {msg}")]
    Store {
        /// Store name that failed.
        store: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Filesystem failure surfaced by strict export.
    #[error("io error: {0}")]
    Io(String),
}

impl TsError {
    /// Helper: build an `InsufficientData` error.
    #[must_use]
    pub const fn insufficient(needed: usize, found: usize) -> Self {
        Self::InsufficientData { needed, found }
    }

    /// Helper: build an `EmptyPopulation` error for a description of the population.
    pub fn empty_population(what: impl Into<String>) -> Self {
        Self::EmptyPopulation { what: what.into() }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `Store` error with the store name and message.
    pub fn store(store: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Store {
            store: store.into(),
            msg: msg.into(),
        }
    }

    /// Returns true if the error stems from a series that is too short or has
    /// no measured values, as opposed to bad arguments or collaborator failures.
    #[must_use]
    pub const fn is_degenerate_input(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. } | Self::EmptyPopulation { .. }
        )
    }
}

impl From<std::io::Error> for TsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
