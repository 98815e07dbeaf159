//! Batch orchestration: fetch pending rows, geocode them, and persist the
//! results, with per-batch fault isolation.

use indicatif::ProgressBar;
use tracing::{error, info};

use crate::db::LocationRepository;
use crate::error::EnrichError;
use crate::geocode::{Geocoder, Resolution};
use crate::models::{GeocodeResult, GeocodeStatus, LocationRecord, Summary};

pub struct EnrichmentPipeline {
    geocoder: Geocoder,
    repository: LocationRepository,
    batch_size: usize,
}

impl EnrichmentPipeline {
    pub fn new(geocoder: Geocoder, repository: LocationRepository, batch_size: usize) -> Self {
        Self {
            geocoder,
            repository,
            batch_size: batch_size.max(1),
        }
    }

    /// Run one enrichment pass over all pending rows.
    ///
    /// Per-record outcomes and per-batch persist failures are accumulated
    /// into the summary; only a fetch failure aborts the run. A failed
    /// batch is rolled back and its rows stay unclassified, so the next
    /// run picks them up again.
    pub async fn run(&self) -> Result<Summary, EnrichError> {
        info!("Fetching pending locations...");
        let records = self.repository.fetch_pending().await?;
        info!("{} locations to classify", records.len());

        let mut summary = Summary::default();
        let pb = ProgressBar::new(records.len() as u64);

        for batch in records.chunks(self.batch_size) {
            let results = geocode_batch(&self.geocoder, batch);

            let updates: Vec<(u64, &str)> = results
                .iter()
                .filter_map(|r| r.persisted_value().map(|v| (r.record_id, v)))
                .collect();

            match self.repository.persist(&updates).await {
                Ok(()) => record_batch(&mut summary, &results, true),
                Err(e) => {
                    error!("{}", e);
                    record_batch(&mut summary, &results, false);
                }
            }

            pb.inc(batch.len() as u64);
        }

        pb.finish_and_clear();
        Ok(summary)
    }
}

/// Fold one batch's outcomes into the summary. When the batch failed to
/// persist, rows that would have been written count as `Errored`; rows the
/// batch never contained (invalid input, nothing to write) keep their
/// original status.
pub fn record_batch(summary: &mut Summary, results: &[GeocodeResult], persisted: bool) {
    for result in results {
        if persisted || result.persisted_value().is_none() {
            summary.record(result.status);
        } else {
            summary.record(GeocodeStatus::Errored);
        }
    }
}

/// Classify one batch of records. No I/O; read-only access to the index.
/// Rows with a missing coordinate are flagged immediately and never reach
/// the geocoder's range check.
pub fn geocode_batch(geocoder: &Geocoder, records: &[LocationRecord]) -> Vec<GeocodeResult> {
    records
        .iter()
        .map(|record| {
            let (status, state) = match (record.lat, record.lng) {
                (Some(lat), Some(lng)) => match geocoder.resolve(lat, lng) {
                    Resolution::Matched(state) => (GeocodeStatus::Matched, Some(state)),
                    Resolution::Unmatched => (GeocodeStatus::Unmatched, None),
                    Resolution::InvalidInput => (GeocodeStatus::InvalidInput, None),
                },
                _ => (GeocodeStatus::InvalidInput, None),
            };
            GeocodeResult {
                record_id: record.id,
                status,
                state,
            }
        })
        .collect()
}
