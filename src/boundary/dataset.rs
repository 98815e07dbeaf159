//! Loads state boundary polygons from an ESRI shapefile.

use std::path::Path;

use geo::{Area, BoundingRect, MultiPolygon};
use shapefile::dbase::FieldValue;
use shapefile::Shape;
use tracing::{info, warn};

use crate::error::EnrichError;
use crate::models::AusState;

/// A single state boundary with its precomputed area (square degrees),
/// used for the smallest-area tie-break on overlapping polygons.
#[derive(Debug, Clone)]
pub struct StateBoundary {
    pub state: AusState,
    pub geometry: MultiPolygon<f64>,
    pub area: f64,
}

impl StateBoundary {
    pub fn new(state: AusState, geometry: MultiPolygon<f64>) -> Self {
        let area = geometry.unsigned_area();
        Self {
            state,
            geometry,
            area,
        }
    }

    /// Bounding box as (min_x, min_y, max_x, max_y), None for empty geometry.
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        self.geometry
            .bounding_rect()
            .map(|rect| (rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }
}

/// Load all usable boundary polygons from the shapefile at `path`.
///
/// `name_field` is the attribute column holding the state name
/// (`STE_NAME21` in the ABS STE 2021 bundle). Features with a missing or
/// unknown name, or a non-polygon shape, are skipped with a warning. A
/// dataset yielding zero usable polygons is an error.
pub fn load(path: &Path, name_field: &str) -> Result<Vec<StateBoundary>, EnrichError> {
    info!("Loading boundary dataset from {}", path.display());

    let mut reader = shapefile::Reader::from_path(path).map_err(|e| EnrichError::DatasetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut boundaries = Vec::new();

    for feature in reader.iter_shapes_and_records() {
        let (shape, record) = feature.map_err(|e| EnrichError::DatasetLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let name = match record.get(name_field) {
            Some(FieldValue::Character(Some(name))) => name.clone(),
            _ => {
                warn!("Feature without a {} attribute, skipping", name_field);
                continue;
            }
        };

        let geometry = match shape {
            Shape::Polygon(polygon) => match MultiPolygon::<f64>::try_from(polygon) {
                Ok(geometry) => geometry,
                Err(e) => {
                    warn!("Unusable geometry for {}: {}", name, e);
                    continue;
                }
            },
            Shape::NullShape => continue,
            _ => {
                warn!("Skipping non-polygon feature for {}", name);
                continue;
            }
        };

        match AusState::from_dataset_name(&name) {
            Some(state) => boundaries.push(StateBoundary::new(state, geometry)),
            None => warn!("Unknown state name in dataset: {}", name),
        }
    }

    if boundaries.is_empty() {
        return Err(EnrichError::DatasetLoad {
            path: path.to_path_buf(),
            reason: "no usable boundary polygons".into(),
        });
    }

    info!("Loaded {} state boundaries", boundaries.len());
    Ok(boundaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Polygon};

    fn unit_square() -> MultiPolygon<f64> {
        MultiPolygon(vec![Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            vec![],
        )])
    }

    #[test]
    fn missing_file_is_dataset_load_error() {
        let err = load(Path::new("/nonexistent/STE_2021_AUST_GDA2020.shp"), "STE_NAME21")
            .unwrap_err();
        assert!(matches!(err, EnrichError::DatasetLoad { .. }));
    }

    #[test]
    fn boundary_precomputes_area_and_bbox() {
        let boundary = StateBoundary::new(AusState::Victoria, unit_square());
        assert!((boundary.area - 1.0).abs() < 1e-9);
        assert_eq!(boundary.bbox(), Some((0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn degenerate_geometry_has_zero_area() {
        let line = MultiPolygon(vec![Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]),
            vec![],
        )]);
        let boundary = StateBoundary::new(AusState::Tasmania, line);
        assert_eq!(boundary.area, 0.0);
    }
}
