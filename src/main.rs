//! State enrichment pass over the device-location table.
//!
//! Provisions the boundary dataset, builds the spatial index, classifies
//! pending rows, and writes results back in transactional batches.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use banksia::boundary::{self, StateSpatialIndex};
use banksia::config::Config;
use banksia::db::LocationRepository;
use banksia::geocode::Geocoder;
use banksia::pipeline::EnrichmentPipeline;

#[derive(Parser, Debug)]
#[command(name = "banksia")]
#[command(about = "Enrich device locations with the Australian state they fall in")]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Batch size override (default from BATCH_SIZE, else 500)
    #[arg(long)]
    batch_size: Option<usize>,

    /// Re-classify every row instead of only rows without a state
    #[arg(long)]
    reprocess_all: bool,

    /// Use an already-extracted shapefile instead of provisioning one
    #[arg(long)]
    shapefile: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    dotenvy::dotenv().ok();
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(batch_size) = args.batch_size {
        anyhow::ensure!(batch_size > 0, "--batch-size must be positive");
        config.batch_size = batch_size;
    }
    if args.reprocess_all {
        config.db.reprocess_all = true;
    }
    config.log();

    let run_start = Utc::now();

    let shapefile_path = match args.shapefile {
        Some(path) => path,
        None => boundary::provision::ensure_dataset(&config.data_dir, &config.dataset_url)
            .await
            .context("Failed to provision boundary dataset")?,
    };

    let boundaries = boundary::dataset::load(&shapefile_path, &config.name_field)?;
    let index = StateSpatialIndex::build(boundaries);
    let geocoder = Geocoder::new(index);
    info!("Geocoder ready with {} boundaries", geocoder.index().len());

    let repository = LocationRepository::connect(&config.db).await?;

    let pipeline = EnrichmentPipeline::new(geocoder, repository, config.batch_size);
    let summary = pipeline.run().await?;

    info!(
        "Run complete in {}s: {} matched, {} unmatched, {} invalid, {} errored ({} total)",
        (Utc::now() - run_start).num_seconds(),
        summary.matched,
        summary.unmatched,
        summary.invalid,
        summary.errored,
        summary.total
    );

    Ok(())
}
