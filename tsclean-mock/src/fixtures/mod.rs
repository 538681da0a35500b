//! Deterministic sensor feeds.
//!
//! Every fixture starts at [`T0`], a timestamp aligned to a whole hour, so
//! sub-daily grids start exactly on it.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tsclean_core::{Sample, Series};

/// Start of every fixture feed (2023-11-14T22:00:00Z).
pub const T0: i64 = 1_699_999_200;

/// Fixture timestamp `sec` seconds after [`T0`].
#[must_use]
pub fn at(sec: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(T0 + sec, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Boiler temperature sampled every 10s for eight minutes.
///
/// Contains two spikes (`250.0` at 110s, `-40.0` at 300s), a "no data" marker
/// at 200s, a dropout between 360s and 400s and one pair delivered out of
/// order.
#[must_use]
pub fn boiler() -> Series {
    let mut samples: Vec<Sample> = (0..48)
        .filter(|i| !(36..40).contains(i))
        .map(|i| {
            let ts = at(i * 10);
            match i {
                11 => Sample::new(ts, 250.0),
                20 => Sample::missing(ts),
                30 => Sample::new(ts, -40.0),
                _ => Sample::new(ts, 60.0 + ((i * 7) % 5) as f64 * 0.2),
            }
        })
        .collect();
    samples.swap(5, 6);
    Series::from_samples("boiler", samples)
}

/// Three readings one second apart: `10`, `20`, `30`.
#[must_use]
pub fn greenhouse() -> Series {
    Series::from_readings("greenhouse", [(at(0), 10.0), (at(1), 20.0), (at(2), 30.0)])
}

/// Two readings of `5` twenty seconds apart.
#[must_use]
pub fn sparse() -> Series {
    Series::from_readings("sparse", [(at(0), 5.0), (at(20), 5.0)])
}

/// Pseudo-random feed of `len` readings around `20.0`, reproducible per `seed`.
///
/// Readings are 5 to 15 seconds apart; about 2% are spikes of +/-100 and
/// about 2% are "no data" markers.
#[must_use]
pub fn synthetic(seed: u64, len: usize) -> Series {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sec = 0i64;
    let mut out = Series::new(format!("synthetic-{seed}"));
    for _ in 0..len {
        let ts = at(sec);
        let roll: f64 = rng.random();
        let sample = if roll < 0.02 {
            Sample::missing(ts)
        } else if roll < 0.04 {
            let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            Sample::new(ts, 20.0 + sign * 100.0)
        } else {
            Sample::new(ts, 20.0 + rng.random_range(-1.0..1.0))
        };
        out.add(sample);
        sec += rng.random_range(5..=15);
    }
    out
}

/// Fixture feed for a store key.
#[must_use]
pub fn by_key(key: &str) -> Option<Series> {
    match key {
        "boiler" => Some(boiler()),
        "greenhouse" => Some(greenhouse()),
        "sparse" => Some(sparse()),
        _ => None,
    }
}
