//! Spatial relationships between a freshly parsed collection and the
//! already-loaded layers. Both checks are pure and never mutate the
//! layers; an empty report means "no relationship found".

pub mod geometry;

use geo::{Contains, Intersects};

use crate::types::geojson::FeatureCollection;
use crate::types::layer::MapLayer;

use geometry::to_geo;

/// Names of visible layers the new collection spatially intersects,
/// in the order the layers were supplied.
pub fn intersecting_layers(collection: &FeatureCollection, layers: &[MapLayer]) -> Vec<String> {
    let new_geometries = collection_geometries(collection);
    if new_geometries.is_empty() {
        return Vec::new();
    }

    layers
        .iter()
        .filter(|layer| layer.visible)
        .filter(|layer| {
            collection_geometries(&layer.data).iter().any(|existing| {
                new_geometries
                    .iter()
                    .any(|incoming| incoming.intersects(existing))
            })
        })
        .map(|layer| layer.name.clone())
        .collect()
}

/// Names of visible layers whose geometry is fully contained within
/// the new collection's geometry. Containment is strict: partial
/// overlap does not qualify, and a layer with no usable geometry is
/// never reported.
pub fn covered_layers(collection: &FeatureCollection, layers: &[MapLayer]) -> Vec<String> {
    let new_geometries = collection_geometries(collection);
    if new_geometries.is_empty() {
        return Vec::new();
    }

    layers
        .iter()
        .filter(|layer| layer.visible)
        .filter(|layer| {
            let existing = collection_geometries(&layer.data);
            !existing.is_empty()
                && existing.iter().all(|geometry| {
                    new_geometries
                        .iter()
                        .any(|incoming| incoming.contains(geometry))
                })
        })
        .map(|layer| layer.name.clone())
        .collect()
}

fn collection_geometries(collection: &FeatureCollection) -> Vec<geo::Geometry<f64>> {
    collection
        .features
        .iter()
        .filter_map(|feature| to_geo(&feature.geometry))
        .collect()
}

#[cfg(test)]
#[path = "tests/analyze_tests.rs"]
mod tests;
