//! Banksia - enriches a device-location table with the Australian state
//! each record's coordinates fall in.
//!
//! This library provides the boundary dataset loader, spatial index,
//! geocoder, repository, and pipeline used by the banksia binary.

pub mod boundary;
pub mod config;
pub mod db;
pub mod error;
pub mod geocode;
pub mod models;
pub mod pipeline;

pub use error::EnrichError;
pub use models::{AusState, GeocodeResult, GeocodeStatus, LocationRecord, Summary};
