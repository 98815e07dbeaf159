//! MySQL repository for the device-location table.

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::{debug, info};

use crate::config::DbConfig;
use crate::error::EnrichError;
use crate::models::LocationRecord;

/// Reads rows needing classification and writes resolved states back.
///
/// Fetch policy: by default only rows whose state is still NULL or empty
/// are selected, so reruns never rewrite already-classified rows.
/// `reprocess_all` opts into a full-table rescan.
pub struct LocationRepository {
    pool: MySqlPool,
    table: String,
    reprocess_all: bool,
}

impl LocationRepository {
    /// Connect to the database. Connectivity is verified here so an
    /// unreachable store fails the run before any geocoding happens.
    pub async fn connect(cfg: &DbConfig) -> Result<Self, EnrichError> {
        info!("Connecting to MySQL at {}...", cfg.server);

        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .connect(&cfg.connection_url())
            .await
            .map_err(EnrichError::Connection)?;

        Ok(Self {
            pool,
            table: cfg.table.clone(),
            reprocess_all: cfg.reprocess_all,
        })
    }

    /// Fetch all rows pending classification.
    pub async fn fetch_pending(&self) -> Result<Vec<LocationRecord>, EnrichError> {
        // Identifiers cannot be bound; the table name is validated as a
        // plain identifier at config load.
        let query = if self.reprocess_all {
            format!("SELECT id, lat, lng FROM {}", self.table)
        } else {
            format!(
                "SELECT id, lat, lng FROM {} WHERE state IS NULL OR state = ''",
                self.table
            )
        };

        let records = sqlx::query_as::<_, LocationRecord>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(EnrichError::Connection)?;

        debug!("Fetched {} pending locations", records.len());
        Ok(records)
    }

    /// Apply one batch of state updates inside a single transaction.
    /// Any failure rolls the whole batch back, never leaving a strict
    /// subset of the batch applied.
    pub async fn persist(&self, updates: &[(u64, &str)]) -> Result<(), EnrichError> {
        if updates.is_empty() {
            return Ok(());
        }

        let statement = format!("UPDATE {} SET state = ? WHERE id = ?", self.table);
        let persist_err = |source: sqlx::Error| EnrichError::Persist {
            rows: updates.len(),
            source,
        };

        let mut tx = self.pool.begin().await.map_err(persist_err)?;

        for (id, state) in updates {
            sqlx::query(&statement)
                .bind(*state)
                .bind(*id)
                .execute(&mut *tx)
                .await
                .map_err(persist_err)?;
        }

        tx.commit().await.map_err(persist_err)?;

        debug!("Persisted batch of {} updates", updates.len());
        Ok(())
    }
}
