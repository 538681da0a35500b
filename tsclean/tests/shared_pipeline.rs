use tsclean::{Pipeline, SeriesKey, SeriesStore, SharedPipeline, Slot, TrimPolicy, TsError};
use tsclean_mock::{MemoryStore, fixtures};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_passes_are_serialized() {
    let shared = SharedPipeline::new(Pipeline::new(fixtures::synthetic(11, 600)).unwrap());
    let original_len = shared.snapshot(Slot::Original).await.len();

    let mut tasks = Vec::new();
    for i in 0..16 {
        let worker = shared.clone();
        tasks.push(tokio::spawn(async move {
            match i % 4 {
                0 => worker
                    .clean(TrimPolicy::DeviceLimits {
                        min: -50.0,
                        max: 90.0,
                    })
                    .await
                    .map(|_| ()),
                1 => worker.clean(TrimPolicy::Percentile { p: 0.01 }).await.map(|_| ()),
                2 => worker.downsample("1m", "avg").await.map(|_| ()),
                _ => {
                    worker.reset_cleaned().await;
                    Ok(())
                }
            }
        }));
    }
    for t in tasks {
        match t.await.unwrap() {
            Ok(()) | Err(TsError::InsufficientData { .. }) => {}
            Err(e) => panic!("unexpected error {e}"),
        }
    }

    let guard = shared.lock().await;
    // a reset may have cleared Cleaned, never the audit log
    assert!(guard.cleaned().len() <= original_len);
    assert_eq!(guard.original().len(), original_len);
    drop(guard);

    let pipeline = shared.try_into_inner().unwrap();
    assert_eq!(pipeline.original().len(), original_len);
}

#[tokio::test]
async fn lock_allows_multi_step_sequences() {
    let shared = SharedPipeline::from(Pipeline::new(fixtures::boiler()).unwrap());
    {
        let mut p = shared.lock().await;
        p.device_limits_cleaning(0.0, 100.0).unwrap();
        p.downsample("30s", "max").unwrap();
    }
    assert_eq!(shared.snapshot(Slot::Rejected).await.len(), 2);
    assert_eq!(shared.snapshot(Slot::Resampled).await.len(), 16);

    let other = shared.clone();
    let shared = shared.try_into_inner().unwrap_err();
    drop(other);
    assert!(shared.try_into_inner().is_ok());
}

#[tokio::test]
async fn load_clean_save_through_store() {
    let store = MemoryStore::with_fixtures();
    let mut p = Pipeline::load(&store, &SeriesKey::new("boiler"), Pipeline::builder())
        .await
        .unwrap();
    p.device_limits_cleaning(0.0, 100.0).unwrap();

    let key = SeriesKey::new("boiler/rejected");
    p.save(&store, Slot::Rejected, &key).await.unwrap();
    assert_eq!(store.load(&key).await.unwrap().len(), 2);

    let shared = SharedPipeline::new(p);
    let key = SeriesKey::new("boiler/cleaned");
    shared.save(&store, Slot::Cleaned, &key).await.unwrap();
    assert_eq!(store.load(&key).await.unwrap().len(), 42);
}

#[tokio::test]
async fn store_failures_propagate() {
    let store = MemoryStore::with_fixtures();
    let err = Pipeline::load(&store, &SeriesKey::new("FAIL"), Pipeline::builder())
        .await
        .unwrap_err();
    assert!(matches!(err, TsError::Store { .. }));

    let err = Pipeline::load(&store, &SeriesKey::new("absent"), Pipeline::builder())
        .await
        .unwrap_err();
    assert!(matches!(err, TsError::NotFound { .. }));

    let p = Pipeline::new(fixtures::sparse()).unwrap();
    let err = p
        .save(&store, Slot::Original, &SeriesKey::new("FAIL"))
        .await
        .unwrap_err();
    assert!(matches!(err, TsError::Store { .. }));
}
