//! Location rows and per-record geocoding outcomes.

use super::AusState;

/// Sentinel written for rows that fall outside every boundary. Fits the
/// varchar(3) state column and keeps the only-nulls fetch policy
/// idempotent: a second run selects zero already-classified rows.
pub const UNMATCHED_STATE: &str = "N/A";

/// A row from the locations table awaiting classification.
///
/// Column names follow the LibreNMS `locations` schema. Coordinates are
/// nullable; rows without both are flagged `InvalidInput` without ever
/// reaching the geocoder.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LocationRecord {
    pub id: u64,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Per-record classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeStatus {
    Matched,
    Unmatched,
    InvalidInput,
    /// The record's batch failed to persist and was rolled back.
    Errored,
}

/// Outcome of classifying one record, consumed by the persistence step
/// and the run summary.
#[derive(Debug, Clone)]
pub struct GeocodeResult {
    pub record_id: u64,
    pub status: GeocodeStatus,
    pub state: Option<AusState>,
}

impl GeocodeResult {
    /// Value persisted to the state column, if any. `InvalidInput` and
    /// `Errored` rows are never written.
    pub fn persisted_value(&self) -> Option<&'static str> {
        match self.status {
            GeocodeStatus::Matched => self.state.map(|s| s.abbreviation()),
            GeocodeStatus::Unmatched => Some(UNMATCHED_STATE),
            GeocodeStatus::InvalidInput | GeocodeStatus::Errored => None,
        }
    }
}

/// Per-outcome counts for a completed run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub matched: usize,
    pub unmatched: usize,
    pub invalid: usize,
    pub errored: usize,
    pub total: usize,
}

impl Summary {
    pub fn record(&mut self, status: GeocodeStatus) {
        match status {
            GeocodeStatus::Matched => self.matched += 1,
            GeocodeStatus::Unmatched => self.unmatched += 1,
            GeocodeStatus::InvalidInput => self.invalid += 1,
            GeocodeStatus::Errored => self.errored += 1,
        }
        self.total += 1;
    }
}
