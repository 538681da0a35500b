use chrono::{DateTime, Utc};
use proptest::prelude::*;
use tsclean_core::{Aggregation, Frequency, FrequencyUnit, Sample, Series, resample_with_report};

const T0: i64 = 1_700_000_000;

fn arb_feed() -> impl Strategy<Value = Series> {
    proptest::collection::vec(
        (
            0i64..200_000,
            prop::option::weighted(0.85, -50.0f64..50.0),
        ),
        1..200,
    )
    .prop_map(|rows| {
        Series::from_samples(
            "feed",
            rows.into_iter().map(|(sec, v)| Sample {
                value: v,
                ..Sample::missing(DateTime::from_timestamp(T0 + sec, 0).unwrap())
            }),
        )
    })
}

fn arb_frequency() -> impl Strategy<Value = Frequency> {
    (
        1i64..90,
        prop::sample::select(vec![
            FrequencyUnit::Seconds,
            FrequencyUnit::Minutes,
            FrequencyUnit::Hours,
        ]),
    )
        .prop_map(|(m, u)| Frequency::new(m, u))
}

fn arb_rule() -> impl Strategy<Value = Aggregation> {
    prop::sample::select(vec![
        Aggregation::Avg,
        Aggregation::Max,
        Aggregation::Min,
        Aggregation::Last,
    ])
}

proptest! {
    #[test]
    fn grid_covers_feed_without_holes(
        feed in arb_feed(),
        freq in arb_frequency(),
        rule in arb_rule(),
    ) {
        let step = freq.interval().unwrap();
        let ts_min: DateTime<Utc> = feed.samples().iter().map(|s| s.ts).min().unwrap();
        let ts_max: DateTime<Utc> = feed.samples().iter().map(|s| s.ts).max().unwrap();

        let (out, report) = resample_with_report(&feed, &freq, &rule).unwrap();
        let ts = out.timestamps();

        prop_assert_eq!(ts[0], freq.advance(freq.round_start(ts_min)));
        for w in ts.windows(2) {
            prop_assert_eq!(w[1] - w[0], step);
        }
        let last = *ts.last().unwrap();
        prop_assert!(ts_max < last);
        prop_assert!(ts_max >= last - step);
        prop_assert_eq!(report.buckets, out.len());
        prop_assert_eq!(report.consumed, feed.len());
        prop_assert_eq!(report.gaps, out.readings().iter().filter(|v| v.is_none()).count());
    }

    #[test]
    fn bucket_values_stay_within_source_range(
        feed in arb_feed(),
        freq in arb_frequency(),
        rule in arb_rule(),
    ) {
        let (out, _) = resample_with_report(&feed, &freq, &rule).unwrap();
        let values = feed.values();
        if let (Some(lo), Some(hi)) = (
            values.iter().copied().reduce(f64::min),
            values.iter().copied().reduce(f64::max),
        ) {
            for v in out.values() {
                prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
            }
        } else {
            prop_assert!(out.values().is_empty());
        }
    }
}
