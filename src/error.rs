//! Error taxonomy for the enrichment run.
//!
//! `DatasetLoad` and `Connection` are fatal and abort the run. `Persist`
//! fails a single batch, which is rolled back and reported; the run
//! continues with the next batch. Per-record outcomes (missing or
//! out-of-range coordinates, no containing polygon) are `GeocodeStatus`
//! values, not errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("failed to load boundary dataset from {path}: {reason}")]
    DatasetLoad { path: PathBuf, reason: String },

    #[error("database connection failed")]
    Connection(#[source] sqlx::Error),

    #[error("batch persist failed, {rows} rows rolled back")]
    Persist {
        rows: usize,
        #[source]
        source: sqlx::Error,
    },
}
