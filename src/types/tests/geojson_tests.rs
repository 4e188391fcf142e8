use super::*;
use serde_json::json;

#[test]
fn test_feature_collection_serializes_to_geojson() {
    let mut properties = Properties::new();
    properties.insert("name".to_string(), Value::String("Tepe".to_string()));

    let collection = FeatureCollection::new(vec![Feature::new(
        Geometry::Point(vec![30.0, 40.0, 0.0]),
        properties,
    )]);

    let value = serde_json::to_value(&collection).unwrap();
    assert_eq!(value["type"], "FeatureCollection");
    assert_eq!(value["features"][0]["type"], "Feature");
    assert_eq!(value["features"][0]["geometry"]["type"], "Point");
    assert_eq!(
        value["features"][0]["geometry"]["coordinates"],
        json!([30.0, 40.0, 0.0])
    );
    assert_eq!(value["features"][0]["properties"]["name"], "Tepe");
}

#[test]
fn test_geometry_deserializes_from_geojson() {
    let geometry: Geometry = serde_json::from_value(json!({
        "type": "LineString",
        "coordinates": [[29.0, 41.0], [29.1, 41.1]]
    }))
    .unwrap();
    assert_eq!(
        geometry,
        Geometry::LineString(vec![vec![29.0, 41.0], vec![29.1, 41.1]])
    );
}

#[test]
fn test_degenerate_geometries() {
    assert!(Geometry::Point(vec![30.0]).is_degenerate());
    assert!(!Geometry::Point(vec![30.0, 40.0]).is_degenerate());

    assert!(Geometry::LineString(vec![vec![30.0, 40.0]]).is_degenerate());
    assert!(!Geometry::LineString(vec![vec![30.0, 40.0], vec![31.0, 41.0]]).is_degenerate());

    assert!(Geometry::Polygon(vec![]).is_degenerate());
    assert!(Geometry::Polygon(vec![vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 0.0]]])
        .is_degenerate());
    assert!(!Geometry::Polygon(vec![vec![
        vec![0.0, 0.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 0.0]
    ]])
    .is_degenerate());

    assert!(Geometry::MultiLineString(vec![]).is_degenerate());
    assert!(Geometry::MultiPolygon(vec![]).is_degenerate());
}

#[test]
fn test_collection_drawability() {
    assert!(!FeatureCollection::empty().is_drawable());

    let degenerate = FeatureCollection::new(vec![Feature::new(
        Geometry::LineString(vec![vec![30.0, 40.0]]),
        Properties::new(),
    )]);
    assert!(!degenerate.is_drawable());

    let drawable = FeatureCollection::new(vec![Feature::new(
        Geometry::Point(vec![30.0, 40.0]),
        Properties::new(),
    )]);
    assert!(drawable.is_drawable());
}
