//! Spatial index for state boundary lookups.

use std::sync::Arc;

use rstar::{RTree, RTreeObject, AABB};
use tracing::info;

use super::StateBoundary;

/// Wrapper for R-tree indexing of state boundaries
#[derive(Clone)]
pub struct IndexedBoundary {
    pub boundary: Arc<StateBoundary>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedBoundary {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedBoundary {
    pub fn new(boundary: StateBoundary) -> Option<Self> {
        let (min_x, min_y, max_x, max_y) = boundary.bbox()?;
        Some(Self {
            boundary: Arc::new(boundary),
            envelope: AABB::from_corners([min_x, min_y], [max_x, max_y]),
        })
    }
}

/// R-tree over boundary bounding boxes. Built once at pipeline start;
/// read-only afterwards, so concurrent lookups are safe.
pub struct StateSpatialIndex {
    tree: RTree<IndexedBoundary>,
}

impl StateSpatialIndex {
    /// Build the spatial index from loaded boundaries.
    pub fn build(boundaries: Vec<StateBoundary>) -> Self {
        let indexed: Vec<IndexedBoundary> = boundaries
            .into_iter()
            .filter_map(IndexedBoundary::new)
            .collect();

        let tree = RTree::bulk_load(indexed);
        info!("Spatial index built with {} entries", tree.size());

        Self { tree }
    }

    /// All boundaries whose bounding box contains the point. The exact
    /// containment test is the caller's job.
    pub fn candidates(&self, lon: f64, lat: f64) -> impl Iterator<Item = &Arc<StateBoundary>> {
        let query_envelope = AABB::from_point([lon, lat]);
        self.tree
            .locate_in_envelope_intersecting(&query_envelope)
            .map(|ib| &ib.boundary)
    }

    /// Total number of indexed boundaries.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
