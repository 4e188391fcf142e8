//! GeoJSON-shaped data model produced by the ingestion pipeline.
//!
//! Local type definitions instead of an external GeoJSON dependency:
//! the pipeline only ever emits the five geometry types KML can carry,
//! and a typed enum keeps degenerate shapes detectable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `[longitude, latitude]` or `[longitude, latitude, elevation]`.
pub type Position = Vec<f64>;

/// Open string-keyed property map attached to each feature.
///
/// Well-known keys: `name`, `description`, `stroke`, `stroke-width`,
/// `stroke-opacity`, `fill`, `fill-opacity`, `icon`. Anything else
/// (e.g. `ExtendedData` pairs) rides along untyped.
pub type Properties = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Position),
    LineString(Vec<Position>),
    Polygon(Vec<Vec<Position>>),
    MultiLineString(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// A geometry too small to draw or analyze.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Geometry::Point(position) => position.len() < 2,
            Geometry::LineString(line) => line.len() < 2,
            Geometry::Polygon(rings) => rings.first().map_or(true, |ring| ring.len() < 4),
            Geometry::MultiLineString(lines) => {
                lines.is_empty() || lines.iter().all(|line| line.len() < 2)
            }
            Geometry::MultiPolygon(polygons) => {
                polygons.is_empty()
                    || polygons
                        .iter()
                        .all(|rings| rings.first().map_or(true, |ring| ring.len() < 4))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: Geometry,
    pub properties: Properties,
}

impl Feature {
    pub fn new(geometry: Geometry, properties: Properties) -> Self {
        Feature {
            kind: "Feature".to_string(),
            geometry,
            properties,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        FeatureCollection {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }

    pub fn empty() -> Self {
        FeatureCollection::new(Vec::new())
    }

    /// At least one feature carries a non-degenerate geometry.
    pub fn is_drawable(&self) -> bool {
        self.features
            .iter()
            .any(|feature| !feature.geometry.is_degenerate())
    }
}

#[cfg(test)]
#[path = "tests/geojson_tests.rs"]
mod tests;
