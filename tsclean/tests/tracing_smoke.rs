use tsclean::{Pipeline, Slot};
use tsclean_mock::fixtures;

// Runs the instrumented paths under a subscriber; with the `tracing` feature
// off the spans compile away and this is a plain smoke test.
#[test]
fn instrumented_pipeline_runs_under_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tsclean=debug,tsclean_core=debug")
        .with_test_writer()
        .try_init();

    let mut p = Pipeline::new(fixtures::boiler()).unwrap();
    p.device_limits_cleaning(0.0, 100.0).unwrap();
    p.zscore_cleaning(1.0).unwrap();
    assert!(p.downsample("5w", "avg").is_err());
    p.downsample("1m", "avg").unwrap();
    assert!(!p.export(Slot::Cleaned, "/nonexistent-dir/boiler.txt").unwrap());
    p.reset_cleaned();
    assert_eq!(p.cleaned().len(), p.original().len());
}
