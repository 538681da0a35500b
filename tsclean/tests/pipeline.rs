use tsclean::{
    ExportMode, ParseMode, Pipeline, ResetPolicy, Sample, Series, Slot, TsError,
};
use tsclean_mock::fixtures::{self, at};

fn boiler() -> Pipeline {
    Pipeline::new(fixtures::boiler()).unwrap()
}

#[test]
fn build_completes_original_and_copies_it() {
    let p = boiler();
    assert_eq!(p.name(), "boiler");
    assert_eq!(p.original().len(), 44);
    assert!(p.original().summary().is_some());
    let ts = p.original().timestamps();
    assert!(ts.windows(2).all(|w| w[0] < w[1]));

    assert_eq!(p.cleaned().samples(), p.original().samples());
    assert_eq!(p.cleaned().name(), "boiler cleaned");
    assert!(p.resampled().is_empty());
    assert!(p.rejected().is_empty());
}

#[test]
fn build_rejects_degenerate_feeds() {
    let one = Series::from_readings("one", [(at(0), 1.0)]);
    assert_eq!(
        Pipeline::new(one).unwrap_err(),
        TsError::InsufficientData {
            needed: 2,
            found: 1
        }
    );
    let gaps = Series::from_samples("gaps", [Sample::missing(at(0)), Sample::missing(at(1))]);
    assert!(Pipeline::new(gaps).unwrap_err().is_degenerate_input());
}

#[test]
fn device_limits_move_spikes_to_rejected() {
    let mut p = boiler();
    let report = p.device_limits_cleaning(0.0, 100.0).unwrap();
    assert_eq!(report.rejected_low, 1);
    assert_eq!(report.rejected_high, 1);
    assert_eq!(p.cleaned().len(), 42);
    assert_eq!(p.rejected().readings(), vec![Some(-40.0), Some(250.0)]);
    assert!(
        p.rejected()
            .samples()
            .iter()
            .all(|s| s.origin.as_deref() == Some(report.cause.as_str()))
    );
    // original untouched
    assert_eq!(p.original().len(), 44);
}

#[test]
fn cleaning_passes_compose() {
    let mut p = Pipeline::new(fixtures::synthetic(3, 400)).unwrap();
    let first = p.zscore_cleaning(1.5).unwrap();
    let after_first = (p.cleaned().len(), p.rejected().len());
    let second = p.zscore_cleaning(1.5).unwrap();

    assert!(p.cleaned().len() <= after_first.0);
    assert_eq!(p.rejected().len(), after_first.1 + second.rejected());
    assert_eq!(p.rejected().len(), first.rejected() + second.rejected());
    assert_eq!(p.cleaned().len() + p.rejected().len(), p.original().len());
}

#[test]
fn reset_restores_cleaned_and_keeps_rejected_by_default() {
    let mut p = boiler();
    p.device_limits_cleaning(0.0, 100.0).unwrap();
    p.percentile_cleaning(0.1).unwrap();
    p.downsample("1m", "avg").unwrap();
    let rejected = p.rejected().clone();

    p.reset_cleaned();
    assert_eq!(p.cleaned().samples(), p.original().samples());
    assert_eq!(p.cleaned().name(), "boiler cleaned");
    assert!(p.resampled().is_empty());
    assert_eq!(p.rejected(), &rejected);
}

#[test]
fn reset_can_clear_rejected() {
    let mut p = Pipeline::builder()
        .reset_policy(ResetPolicy::ClearRejected)
        .build(fixtures::boiler())
        .unwrap();
    p.device_limits_cleaning(0.0, 100.0).unwrap();
    p.reset_cleaned();
    assert!(p.rejected().is_empty());
    assert_eq!(p.cleaned().len(), 44);
}

#[test]
fn cleaned_is_a_deep_copy() {
    let mut p = boiler();
    let original = p.original().clone();
    p.device_limits_cleaning(60.0, 60.5).unwrap();
    assert_eq!(p.original(), &original);
    p.reset_cleaned();
    assert_eq!(p.cleaned().samples(), original.samples());
}

#[test]
fn downsample_rebuilds_on_every_call() {
    let mut p = boiler();
    p.device_limits_cleaning(0.0, 100.0).unwrap();

    let report = p.downsample("1m", "avg").unwrap();
    assert_eq!(report.buckets, 8);
    assert_eq!(report.gaps, 0);
    assert_eq!(report.consumed, 42);
    assert_eq!(p.resampled().len(), 8);
    assert_eq!(p.resampled().first().unwrap().ts, at(60));

    // the 360s..390s dropout becomes one empty bucket
    let report = p.downsample("30s", "max").unwrap();
    assert_eq!(report.buckets, 16);
    assert_eq!(report.gaps, 1);
    assert_eq!(p.resampled().len(), 16);
    let gap = p.resampled().samples().iter().find(|s| s.value.is_none()).unwrap();
    assert_eq!(gap.ts, at(390));
    assert_eq!(p.resampled().name(), "boiler resampled");
}

#[test]
fn lenient_parsing_degrades() {
    let mut p = boiler();
    p.downsample("1m", "avg").unwrap();

    // unknown unit: the grid cannot advance
    let err = p.downsample("5w", "avg").unwrap_err();
    assert!(matches!(err, TsError::MalformedFrequency(_)));
    assert!(p.resampled().is_empty());

    // unknown rule: every bucket is "no data"
    let report = p.downsample("1m", "median").unwrap();
    assert_eq!(report.gaps, report.buckets);
    assert!(p.resampled().values().is_empty());
}

#[test]
fn strict_parsing_rejects_up_front() {
    let mut p = Pipeline::builder()
        .frequency_parsing(ParseMode::Strict)
        .aggregation_parsing(ParseMode::Strict)
        .build(fixtures::greenhouse())
        .unwrap();

    assert!(matches!(
        p.downsample("5 s", "avg").unwrap_err(),
        TsError::MalformedFrequency(_)
    ));
    assert!(matches!(
        p.downsample("5s", "median").unwrap_err(),
        TsError::InvalidArg(_)
    ));
    assert!(p.resampled().is_empty());

    let report = p.downsample("5s", "avg").unwrap();
    assert_eq!(report.buckets, 1);
    assert_eq!(p.resampled().readings(), vec![Some(20.0)]);
}

#[test]
fn gap_buckets_for_sparse_feed() {
    let mut p = Pipeline::new(fixtures::sparse()).unwrap();
    p.downsample("5s", "last").unwrap();
    assert_eq!(
        p.resampled().readings(),
        vec![Some(5.0), None, None, None, Some(5.0)]
    );
}

#[test]
fn invalid_cleaning_parameters_change_nothing() {
    let mut p = boiler();
    let before = p.clone();
    assert!(p.percentile_cleaning(0.7).is_err());
    assert!(p.zscore_cleaning(0.0).is_err());
    assert!(p.device_limits_cleaning(10.0, 0.0).is_err());
    assert_eq!(p, before);
}

#[test]
fn device_limits_clean_a_single_remaining_sample() {
    let mut p = Pipeline::new(fixtures::greenhouse()).unwrap();
    p.device_limits_cleaning(15.0, 25.0).unwrap();
    assert_eq!(p.cleaned().values(), vec![20.0]);

    let report = p.device_limits_cleaning(0.0, 10.0).unwrap();
    assert_eq!(report.rejected_high, 1);
    assert!(p.cleaned().is_empty());
    assert_eq!(p.rejected().len(), 3);
    assert!(p.percentile_cleaning(0.1).is_err());
}

#[test]
fn export_slots() {
    let dir = tempfile::tempdir().unwrap();
    let mut p = Pipeline::builder()
        .export_mode(ExportMode::Strict)
        .build(fixtures::boiler())
        .unwrap();
    p.device_limits_cleaning(0.0, 100.0).unwrap();

    let path = dir.path().join("rejected.txt");
    assert!(p.export(Slot::Rejected, &path).unwrap());
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().next().unwrap().ends_with("\t -40"));

    let bad = dir.path().join("no-such-dir").join("x.txt");
    assert!(matches!(
        p.export(Slot::Cleaned, &bad).unwrap_err(),
        TsError::Io(_)
    ));

    let lenient = boiler();
    assert!(!lenient.export(Slot::Cleaned, &bad).unwrap());
}

#[test]
fn slots_are_addressable() {
    let p = boiler();
    for slot in [Slot::Original, Slot::Cleaned, Slot::Resampled, Slot::Rejected] {
        assert!(std::ptr::eq(
            p.slot(slot),
            match slot {
                Slot::Original => p.original(),
                Slot::Cleaned => p.cleaned(),
                Slot::Resampled => p.resampled(),
                Slot::Rejected => p.rejected(),
            }
        ));
    }
    assert_eq!(Slot::Rejected.to_string(), "rejected");
}

#[test]
fn builder_name_and_config() {
    let p = Pipeline::builder()
        .name("b-7")
        .export_mode(ExportMode::Strict)
        .build(fixtures::boiler())
        .unwrap();
    assert_eq!(p.name(), "b-7");
    assert_eq!(p.cleaned().name(), "b-7 cleaned");
    assert_eq!(p.original().name(), "boiler");
    assert_eq!(p.config().export_mode, ExportMode::Strict);
    assert_eq!(p.config().reset_policy, ResetPolicy::KeepRejected);
}
