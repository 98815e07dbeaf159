//! Point-in-polygon geocoding against the state boundary index.

use geo::{Intersects, Point};

use crate::boundary::StateSpatialIndex;
use crate::models::AusState;

/// Outcome of resolving a single coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Matched(AusState),
    Unmatched,
    InvalidInput,
}

/// Resolves coordinates to states. Pure with respect to the immutable
/// spatial index, so lookups are safe to run concurrently.
pub struct Geocoder {
    index: StateSpatialIndex,
}

impl Geocoder {
    pub fn new(index: StateSpatialIndex) -> Self {
        Self { index }
    }

    /// Resolve a (lat, lon) pair to the containing state.
    ///
    /// Out-of-range coordinates are rejected before the index is queried.
    /// The exact test is boundary-inclusive (`Intersects` rather than
    /// `Contains`), so a point on a shared border matches both polygons and
    /// the smallest-area one wins; equal areas fall back to the state
    /// abbreviation so repeated runs give the same answer. Zero-area
    /// geometry is skipped.
    pub fn resolve(&self, lat: f64, lon: f64) -> Resolution {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Resolution::InvalidInput;
        }

        let point = Point::new(lon, lat);

        let best = self
            .index
            .candidates(lon, lat)
            .filter(|b| b.area > 0.0)
            .filter(|b| b.geometry.intersects(&point))
            .min_by(|a, b| {
                a.area
                    .total_cmp(&b.area)
                    .then_with(|| a.state.abbreviation().cmp(b.state.abbreviation()))
            });

        match best {
            Some(boundary) => Resolution::Matched(boundary.state),
            None => Resolution::Unmatched,
        }
    }

    /// The underlying spatial index (for stats).
    pub fn index(&self) -> &StateSpatialIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::StateBoundary;
    use geo::{LineString, MultiPolygon, Polygon};

    fn square(state: AusState, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> StateBoundary {
        let geometry = MultiPolygon(vec![Polygon::new(
            LineString::from(vec![
                (min_x, min_y),
                (max_x, min_y),
                (max_x, max_y),
                (min_x, max_y),
                (min_x, min_y),
            ]),
            vec![],
        )]);
        StateBoundary::new(state, geometry)
    }

    fn victoria_geocoder() -> Geocoder {
        // The scenario square: [144, 145] x [-38, -37].
        let index = StateSpatialIndex::build(vec![square(
            AusState::Victoria,
            144.0,
            -38.0,
            145.0,
            -37.0,
        )]);
        Geocoder::new(index)
    }

    #[test]
    fn point_inside_matches() {
        let geocoder = victoria_geocoder();
        assert_eq!(
            geocoder.resolve(-37.5, 144.5),
            Resolution::Matched(AusState::Victoria)
        );
    }

    #[test]
    fn point_outside_every_bbox_is_unmatched() {
        let geocoder = victoria_geocoder();
        assert_eq!(geocoder.resolve(0.0, 0.0), Resolution::Unmatched);
    }

    #[test]
    fn out_of_range_coordinates_are_invalid() {
        let geocoder = victoria_geocoder();
        assert_eq!(geocoder.resolve(90.5, 144.5), Resolution::InvalidInput);
        assert_eq!(geocoder.resolve(-90.5, 144.5), Resolution::InvalidInput);
        assert_eq!(geocoder.resolve(-37.5, 180.5), Resolution::InvalidInput);
        assert_eq!(geocoder.resolve(-37.5, -180.5), Resolution::InvalidInput);
        assert_eq!(geocoder.resolve(f64::NAN, 144.5), Resolution::InvalidInput);
    }

    #[test]
    fn boundary_point_is_contained() {
        let geocoder = victoria_geocoder();
        assert_eq!(
            geocoder.resolve(-37.0, 144.0),
            Resolution::Matched(AusState::Victoria)
        );
    }

    #[test]
    fn smallest_area_wins_for_nested_polygons() {
        let index = StateSpatialIndex::build(vec![
            square(AusState::NewSouthWales, 140.0, -38.0, 154.0, -28.0),
            square(AusState::AustralianCapitalTerritory, 148.7, -35.9, 149.4, -35.1),
        ]);
        let geocoder = Geocoder::new(index);

        assert_eq!(
            geocoder.resolve(-35.3, 149.1),
            Resolution::Matched(AusState::AustralianCapitalTerritory)
        );
        assert_eq!(
            geocoder.resolve(-33.9, 151.2),
            Resolution::Matched(AusState::NewSouthWales)
        );
    }

    #[test]
    fn shared_border_resolves_deterministically() {
        // Two adjacent equal-area squares sharing the x = 141 edge. The
        // area tie falls back to the abbreviation, so SA < VIC.
        let index = StateSpatialIndex::build(vec![
            square(AusState::Victoria, 141.0, -38.0, 145.0, -34.0),
            square(AusState::SouthAustralia, 137.0, -38.0, 141.0, -34.0),
        ]);
        let geocoder = Geocoder::new(index);

        let first = geocoder.resolve(-36.0, 141.0);
        assert_eq!(first, Resolution::Matched(AusState::SouthAustralia));
        for _ in 0..10 {
            assert_eq!(geocoder.resolve(-36.0, 141.0), first);
        }
    }

    #[test]
    fn zero_area_polygons_are_skipped() {
        let line = MultiPolygon(vec![Polygon::new(
            LineString::from(vec![(144.0, -38.0), (145.0, -38.0), (144.0, -38.0)]),
            vec![],
        )]);
        let index = StateSpatialIndex::build(vec![StateBoundary::new(
            AusState::Queensland,
            line,
        )]);
        let geocoder = Geocoder::new(index);

        assert_eq!(geocoder.resolve(-38.0, 144.5), Resolution::Unmatched);
    }

    #[test]
    fn empty_index_is_unmatched() {
        let geocoder = Geocoder::new(StateSpatialIndex::build(vec![]));
        assert_eq!(geocoder.resolve(-37.5, 144.5), Resolution::Unmatched);
    }
}
