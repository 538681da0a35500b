//! Statistics primitives on plain numeric sequences, typically produced by
//! [`Series::values`](crate::Series::values).

use crate::TsError;

/// Running mean of `xs`; `None` for an empty slice.
#[must_use]
pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    let mut m = 0.0;
    for (i, x) in xs.iter().enumerate() {
        m += (x - m) / (i + 1) as f64;
    }
    Some(m)
}

/// Smallest and largest value of `xs`; `None` for an empty slice.
#[must_use]
pub fn bounds(xs: &[f64]) -> Option<(f64, f64)> {
    let (&first, rest) = xs.split_first()?;
    Some(
        rest.iter()
            .fold((first, first), |(lo, hi), &x| (lo.min(x), hi.max(x))),
    )
}

/// Population variance (denominator `n`); `None` for an empty slice.
#[must_use]
pub fn population_variance(xs: &[f64]) -> Option<f64> {
    let m = mean(xs)?;
    Some(xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64)
}

/// Population standard deviation (denominator `n`); `None` for an empty slice.
#[must_use]
pub fn population_std_dev(xs: &[f64]) -> Option<f64> {
    population_variance(xs).map(f64::sqrt)
}

/// Sample standard deviation (denominator `n - 1`); `None` for fewer than two values.
#[must_use]
pub fn sample_std_dev(xs: &[f64]) -> Option<f64> {
    if xs.len() < 2 {
        return None;
    }
    let m = mean(xs)?;
    let ss = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>();
    Some((ss / (xs.len() - 1) as f64).sqrt())
}

/// `q`-quantile of `xs` by linear interpolation between closest ranks.
///
/// The values are sorted internally; position `q * (n - 1)` is interpolated
/// between its two neighbouring order statistics. Returns `None` for an empty
/// slice or `q` outside `[0, 1]`.
#[must_use]
pub fn quantile(xs: &[f64], q: f64) -> Option<f64> {
    if xs.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let pos = q * (sorted.len() - 1) as f64;
    let idx = pos.floor() as usize;
    let frac = pos - idx as f64;
    let a = sorted[idx];
    let b = sorted[(idx + 1).min(sorted.len() - 1)];
    Some(a + (b - a) * frac)
}

/// Mean over the measured entries of `values`, ignoring "no data" markers.
///
/// Returns the mean together with the number of measured entries.
///
/// # Errors
/// Returns `TsError::EmptyPopulation` when no entry is measured.
pub fn measured_mean(values: &[Option<f64>]) -> Result<(f64, usize), TsError> {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        return Err(TsError::empty_population("measured values"));
    }
    Ok((sum / count as f64, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn mean_and_bounds() {
        assert_eq!(mean(&[]), None);
        assert!((mean(&[10.0, 20.0, 30.0]).unwrap() - 20.0).abs() < EPS);
        assert_eq!(bounds(&[]), None);
        assert_eq!(bounds(&[3.0, -1.0, 7.5, 2.0]), Some((-1.0, 7.5)));
        assert_eq!(bounds(&[4.0]), Some((4.0, 4.0)));
    }

    #[test]
    fn std_dev_estimators() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std_dev(&xs).unwrap() - 2.0).abs() < EPS);
        let sample = sample_std_dev(&xs).unwrap();
        assert!((sample - (32.0f64 / 7.0).sqrt()).abs() < EPS);
        assert_eq!(sample_std_dev(&[1.0]), None);
        assert_eq!(population_std_dev(&[]), None);
    }

    #[test]
    fn quantile_interpolates_between_ranks() {
        let xs = [4.0, 1.0, 3.0, 2.0, 5.0];
        assert_eq!(quantile(&xs, 0.0), Some(1.0));
        assert_eq!(quantile(&xs, 1.0), Some(5.0));
        assert_eq!(quantile(&xs, 0.5), Some(3.0));
        // pos = 0.1 * 4 = 0.4 -> 1 + 0.4 * (2 - 1)
        assert!((quantile(&xs, 0.1).unwrap() - 1.4).abs() < EPS);
        assert_eq!(quantile(&[7.0], 0.3), Some(7.0));
        assert_eq!(quantile(&[], 0.3), None);
        assert_eq!(quantile(&xs, 1.5), None);
        assert_eq!(quantile(&xs, -0.1), None);
    }

    #[test]
    fn measured_mean_skips_markers() {
        let (m, n) = measured_mean(&[Some(2.0), None, Some(4.0)]).unwrap();
        assert!((m - 3.0).abs() < EPS);
        assert_eq!(n, 2);
        // a measured zero still counts
        let (m, n) = measured_mean(&[Some(0.0), None]).unwrap();
        assert_eq!((m, n), (0.0, 1));
    }

    #[test]
    fn measured_mean_of_gaps_is_empty_population() {
        let err = measured_mean(&[None, None]).unwrap_err();
        assert!(matches!(err, TsError::EmptyPopulation { .. }));
        assert!(measured_mean(&[]).is_err());
    }
}
