use proptest::prelude::*;
use tsclean::{Pipeline, ResetPolicy, TrimPolicy, TsError};
use tsclean_mock::fixtures;

#[derive(Debug, Clone)]
enum Op {
    Clean(TrimPolicy),
    Reset,
    Downsample(&'static str, &'static str),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0.01f64..0.3).prop_map(|p| Op::Clean(TrimPolicy::Percentile { p })),
        (0.5f64..3.0).prop_map(|level| Op::Clean(TrimPolicy::ZScore { level })),
        (-200.0f64..20.0, 20.0f64..200.0)
            .prop_map(|(min, max)| Op::Clean(TrimPolicy::DeviceLimits { min, max })),
        Just(Op::Reset),
        prop::sample::select(vec![
            Op::Downsample("30s", "avg"),
            Op::Downsample("1m", "last"),
            Op::Downsample("5m", "max"),
        ]),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn audit_log_accounts_for_every_sample(
        seed in 0u64..1_000,
        ops in proptest::collection::vec(arb_op(), 1..12),
    ) {
        let mut p = Pipeline::new(fixtures::synthetic(seed, 150)).unwrap();
        let total = p.original().len();
        let mut since_reset = 0usize;

        for op in ops {
            let rejected_before = p.rejected().len();
            match op {
                Op::Clean(policy) => match p.clean(policy) {
                    Ok(report) => {
                        since_reset += report.rejected();
                        prop_assert_eq!(p.rejected().len(), rejected_before + report.rejected());
                    }
                    Err(TsError::InsufficientData { .. }) => {
                        prop_assert_eq!(p.rejected().len(), rejected_before);
                    }
                    Err(e) => prop_assert!(false, "unexpected error {e}"),
                },
                Op::Reset => {
                    p.reset_cleaned();
                    since_reset = 0;
                    prop_assert_eq!(p.cleaned().samples(), p.original().samples());
                    prop_assert!(p.resampled().is_empty());
                    prop_assert_eq!(p.rejected().len(), rejected_before);
                }
                Op::Downsample(freq, rule) => match p.downsample(freq, rule) {
                    Ok(report) => prop_assert_eq!(report.consumed, p.cleaned().len()),
                    Err(TsError::InsufficientData { .. }) => {
                        prop_assert!(p.cleaned().is_empty());
                        prop_assert!(p.resampled().is_empty());
                    }
                    Err(e) => prop_assert!(false, "unexpected error {e}"),
                },
            }
            prop_assert_eq!(p.cleaned().len() + since_reset, total);
            prop_assert_eq!(p.original().len(), total);
        }
        prop_assert_eq!(p.config().reset_policy, ResetPolicy::KeepRejected);
    }
}
