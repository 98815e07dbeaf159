//! Shared domain types.

mod location;
mod state;

pub use location::{GeocodeResult, GeocodeStatus, LocationRecord, Summary, UNMATCHED_STATE};
pub use state::AusState;
