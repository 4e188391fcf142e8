//! Typed geometry to `geo` conversion for predicate evaluation.

use geo::{Coord, LineString, MultiLineString, MultiPolygon, Point, Polygon};

use crate::types::geojson::{Geometry, Position};

/// Planar conversion; elevation is dropped. Degenerate geometries
/// convert to `None` and are skipped by the analyzer.
pub fn to_geo(geometry: &Geometry) -> Option<geo::Geometry<f64>> {
    if geometry.is_degenerate() {
        return None;
    }
    match geometry {
        Geometry::Point(position) => Some(geo::Geometry::Point(Point::new(
            position[0],
            position[1],
        ))),
        Geometry::LineString(line) => Some(geo::Geometry::LineString(line_string(line))),
        Geometry::Polygon(rings) => polygon(rings).map(geo::Geometry::Polygon),
        Geometry::MultiLineString(lines) => {
            Some(geo::Geometry::MultiLineString(MultiLineString::new(
                lines
                    .iter()
                    .filter(|line| line.len() >= 2)
                    .map(|line| line_string(line))
                    .collect(),
            )))
        }
        Geometry::MultiPolygon(polygons) => Some(geo::Geometry::MultiPolygon(MultiPolygon::new(
            polygons.iter().filter_map(|rings| polygon(rings)).collect(),
        ))),
    }
}

fn coord(position: &Position) -> Coord<f64> {
    Coord {
        x: position[0],
        y: position[1],
    }
}

fn line_string(positions: &[Position]) -> LineString<f64> {
    LineString::new(
        positions
            .iter()
            .filter(|position| position.len() >= 2)
            .map(coord)
            .collect(),
    )
}

fn polygon(rings: &[Vec<Position>]) -> Option<Polygon<f64>> {
    let mut iter = rings.iter();
    let exterior = iter.next()?;
    if exterior.len() < 4 {
        return None;
    }
    Some(Polygon::new(
        line_string(exterior),
        iter.filter(|ring| ring.len() >= 4)
            .map(|ring| line_string(ring))
            .collect(),
    ))
}
