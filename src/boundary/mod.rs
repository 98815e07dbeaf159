//! State boundary dataset: shapefile loading, spatial indexing, and
//! idempotent provisioning of the on-disk bundle.

pub mod dataset;
pub mod index;
pub mod provision;

pub use dataset::{load, StateBoundary};
pub use index::StateSpatialIndex;
