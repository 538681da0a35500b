//! Frequency specifications (`"30s"`, `"5m"`, `"2h"`, `"1d"`) and the grid
//! arithmetic the resampler is built on.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ParseMode;
use crate::error::TsError;

/// Time unit of a [`Frequency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencyUnit {
    /// `s`
    Seconds,
    /// `m`
    Minutes,
    /// `h`
    Hours,
    /// `d`
    Days,
}

impl FrequencyUnit {
    /// Map a unit letter to a unit.
    #[must_use]
    pub const fn from_letter(c: char) -> Option<Self> {
        match c {
            's' => Some(Self::Seconds),
            'm' => Some(Self::Minutes),
            'h' => Some(Self::Hours),
            'd' => Some(Self::Days),
            _ => None,
        }
    }

    /// The unit letter used in frequency strings.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Seconds => 's',
            Self::Minutes => 'm',
            Self::Hours => 'h',
            Self::Days => 'd',
        }
    }

    const fn seconds(self) -> i64 {
        match self {
            Self::Seconds => 1,
            Self::Minutes => 60,
            Self::Hours => 3_600,
            Self::Days => 86_400,
        }
    }
}

/// An aggregation interval: a magnitude and a unit.
///
/// Leniently parsed frequencies may carry no unit (unknown letter) or a zero
/// magnitude (unparsable digits). Such a frequency is a no-op for
/// [`round_start`](Self::round_start) and [`advance`](Self::advance): the
/// instant is returned unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frequency {
    /// Number of units per interval.
    pub magnitude: i64,
    /// Interval unit, `None` when the unit letter was not recognized.
    pub unit: Option<FrequencyUnit>,
}

impl Frequency {
    /// Build a frequency from its parts.
    #[must_use]
    pub const fn new(magnitude: i64, unit: FrequencyUnit) -> Self {
        Self {
            magnitude,
            unit: Some(unit),
        }
    }

    /// Parse a frequency string under the given mode.
    ///
    /// `Strict` requires one or more ASCII digits followed by exactly one of
    /// `s`, `m`, `h`, `d`. `Lenient` never fails: digits that do not parse become
    /// a zero magnitude and an unknown trailing letter becomes `unit = None`.
    ///
    /// # Errors
    /// Returns `TsError::MalformedFrequency` in `Strict` mode when `spec` does not
    /// match the grammar.
    pub fn parse(spec: &str, mode: ParseMode) -> Result<Self, TsError> {
        match mode {
            ParseMode::Strict => Self::parse_strict(spec),
            ParseMode::Lenient => Ok(Self::parse_lenient(spec)),
        }
    }

    fn parse_strict(spec: &str) -> Result<Self, TsError> {
        let malformed = || TsError::MalformedFrequency(spec.to_string());
        let mut chars = spec.chars();
        let unit = chars
            .next_back()
            .and_then(FrequencyUnit::from_letter)
            .ok_or_else(malformed)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let magnitude = digits.parse::<i64>().map_err(|_| malformed())?;
        Ok(Self::new(magnitude, unit))
    }

    fn parse_lenient(spec: &str) -> Self {
        let mut chars = spec.chars();
        let Some(last) = chars.next_back() else {
            return Self {
                magnitude: 0,
                unit: None,
            };
        };
        Self {
            magnitude: chars.as_str().parse::<i64>().unwrap_or(0),
            unit: FrequencyUnit::from_letter(last),
        }
    }

    /// Length of one interval, or `None` when the unit is unknown or the
    /// arithmetic overflows.
    #[must_use]
    pub fn interval(&self) -> Option<TimeDelta> {
        let unit = self.unit?;
        TimeDelta::try_seconds(self.magnitude.checked_mul(unit.seconds())?)
    }

    /// Whether this frequency can drive a resampling grid, i.e. it advances
    /// time by a strictly positive amount.
    #[must_use]
    pub fn is_advancing(&self) -> bool {
        self.interval().is_some_and(|d| d > TimeDelta::zero())
    }

    /// First-bucket anchor for a series starting at `ts`.
    ///
    /// Seconds, minutes and hours truncate down to a multiple of the interval
    /// counted from the Unix epoch (sub-second precision is dropped). Days do
    /// not truncate: the anchor is `ts` minus `magnitude` days, so the first
    /// bucket edge lands exactly on `ts`. Unknown units return `ts` unchanged.
    #[must_use]
    pub fn round_start(&self, ts: DateTime<Utc>) -> DateTime<Utc> {
        match self.unit {
            Some(FrequencyUnit::Days) => TimeDelta::try_days(self.magnitude)
                .and_then(|d| ts.checked_sub_signed(d))
                .unwrap_or(ts),
            Some(unit) => {
                let step = self.magnitude.saturating_mul(unit.seconds());
                if step <= 0 {
                    return ts;
                }
                let secs = ts.timestamp();
                DateTime::from_timestamp(secs - secs.rem_euclid(step), 0).unwrap_or(ts)
            }
            None => ts,
        }
    }

    /// `ts` plus one interval; unchanged for unknown units or on overflow.
    #[must_use]
    pub fn advance(&self, ts: DateTime<Utc>) -> DateTime<Utc> {
        self.interval()
            .and_then(|d| ts.checked_add_signed(d))
            .unwrap_or(ts)
    }
}

impl FromStr for Frequency {
    type Err = TsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_strict(s)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{}{}", self.magnitude, unit.letter()),
            None => write!(f, "{}?", self.magnitude),
        }
    }
}
