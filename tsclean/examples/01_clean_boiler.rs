use tsclean::{Pipeline, SeriesKey, SeriesTable, Slot, SummaryTable};
use tsclean_mock::MemoryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "tsclean=debug,tsclean_core=debug".into()),
        )
        .init();

    // 1. Load the raw feed from the fixture store.
    let store = MemoryStore::with_fixtures();
    let mut pipeline =
        Pipeline::load(&store, &SeriesKey::new("boiler"), Pipeline::builder()).await?;

    // 2. Drop physically impossible readings, then statistical outliers.
    let report = pipeline.device_limits_cleaning(0.0, 120.0)?;
    println!("device limits removed {} samples", report.rejected());
    let report = pipeline.percentile_cleaning(0.05)?;
    println!("percentile pass removed {} samples", report.rejected());

    // 3. One bucket per minute; empty minutes show up as "-".
    let buckets = pipeline.downsample("1m", "avg")?;
    println!("{} buckets, {} without data", buckets.buckets, buckets.gaps);
    println!("{}", SeriesTable::new(pipeline.resampled()));
    if let Some(summary) = pipeline.cleaned().summary() {
        println!("{}", SummaryTable::new(summary));
    }
    println!("{}", SeriesTable::new(pipeline.rejected()));

    // 4. Persist the cleaned feed next to the raw one.
    pipeline
        .save(&store, Slot::Cleaned, &SeriesKey::new("boiler/cleaned"))
        .await?;
    Ok(())
}
