//! Element tree to feature conversion.
//!
//! Follows the common KML-to-GeoJSON translation grammar: placemarks
//! become features, geometry elements map to the matching typed
//! geometry, name/description/style sub-elements land in the property
//! map. Conversion is pure: the same tree always yields the same
//! features.

use serde_json::Value;

use crate::services::kml::style::{parse_style, ResolvedStyle, StyleIndex};
use crate::services::kml::tree::XmlElement;
use crate::types::errors::{GeoError, GeoResult};
use crate::types::geojson::{Feature, Geometry, Position, Properties};

/// How to treat `<NetworkLink>` references. They are never followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkLinkPolicy {
    /// Log the reference and keep converting the inline data. Some
    /// legitimate documents combine an external link with inline data
    /// the user still wants.
    #[default]
    WarnAndContinue,
    /// Fail the document.
    Reject,
}

/// Convert a parsed document tree into features.
pub fn convert_tree(
    root: &XmlElement,
    network_links: NetworkLinkPolicy,
) -> GeoResult<Vec<Feature>> {
    let styles = StyleIndex::build(root);
    let mut features = Vec::new();
    walk(root, &styles, network_links, &mut features)?;
    Ok(features)
}

fn walk(
    element: &XmlElement,
    styles: &StyleIndex,
    policy: NetworkLinkPolicy,
    out: &mut Vec<Feature>,
) -> GeoResult<()> {
    for child in &element.children {
        match child.name.as_str() {
            "Placemark" => out.extend(placemark_features(child, styles)),
            "NetworkLink" => match policy {
                NetworkLinkPolicy::WarnAndContinue => {
                    let target = child
                        .child("Link")
                        .or_else(|| child.child("Url"))
                        .and_then(|link| link.child_text("href"))
                        .unwrap_or("<unspecified>");
                    log::warn!("Ignoring network link to {target}: remote documents are never fetched");
                }
                NetworkLinkPolicy::Reject => return Err(GeoError::NetworkLinkRejected),
            },
            _ => walk(child, styles, policy, out)?,
        }
    }
    Ok(())
}

/// A placemark with zero recognized geometry yields no feature. One
/// with several geometries (a mixed `<MultiGeometry>`) yields one
/// feature per geometry, all sharing the placemark's properties.
fn placemark_features(placemark: &XmlElement, styles: &StyleIndex) -> Vec<Feature> {
    let geometries = read_geometries(placemark);
    if geometries.is_empty() {
        return Vec::new();
    }

    let properties = placemark_properties(placemark, styles);
    let mut features = Vec::with_capacity(geometries.len());
    for geometry in geometries {
        features.push(Feature::new(geometry, properties.clone()));
    }
    features
}

fn read_geometries(element: &XmlElement) -> Vec<Geometry> {
    let mut out = Vec::new();
    for child in &element.children {
        match child.name.as_str() {
            "Point" => {
                if let Some(position) = parse_coordinates(child).into_iter().next() {
                    out.push(Geometry::Point(position));
                }
            }
            "LineString" => {
                let line = parse_coordinates(child);
                if !line.is_empty() {
                    out.push(Geometry::LineString(line));
                }
            }
            "Polygon" => {
                if let Some(rings) = parse_polygon(child) {
                    out.push(Geometry::Polygon(rings));
                }
            }
            "MultiGeometry" => out.extend(collapse_multi(read_geometries(child))),
            _ => {}
        }
    }
    out
}

/// A homogeneous multi-geometry collapses to the matching Multi type;
/// a mixed one stays as-is and fans out to one feature per geometry.
fn collapse_multi(geometries: Vec<Geometry>) -> Vec<Geometry> {
    if geometries.len() < 2 {
        return geometries;
    }
    if geometries
        .iter()
        .all(|geometry| matches!(geometry, Geometry::LineString(_)))
    {
        let lines = geometries
            .into_iter()
            .filter_map(|geometry| match geometry {
                Geometry::LineString(line) => Some(line),
                _ => None,
            })
            .collect();
        return vec![Geometry::MultiLineString(lines)];
    }
    if geometries
        .iter()
        .all(|geometry| matches!(geometry, Geometry::Polygon(_)))
    {
        let polygons = geometries
            .into_iter()
            .filter_map(|geometry| match geometry {
                Geometry::Polygon(rings) => Some(rings),
                _ => None,
            })
            .collect();
        return vec![Geometry::MultiPolygon(polygons)];
    }
    geometries
}

fn parse_polygon(polygon: &XmlElement) -> Option<Vec<Vec<Position>>> {
    let outer = polygon
        .child("outerBoundaryIs")?
        .child("LinearRing")
        .map(parse_coordinates)?;
    if outer.is_empty() {
        return None;
    }

    let mut rings = vec![outer];
    for inner in polygon.children_named("innerBoundaryIs") {
        if let Some(ring) = inner.child("LinearRing").map(parse_coordinates) {
            if !ring.is_empty() {
                rings.push(ring);
            }
        }
    }
    Some(rings)
}

/// Parse whitespace-separated `lon,lat[,ele]` tuples. Malformed tuples
/// are skipped rather than failing the document.
fn parse_coordinates(element: &XmlElement) -> Vec<Position> {
    let Some(text) = element.child_text("coordinates") else {
        return Vec::new();
    };
    text.split_whitespace()
        .filter_map(|tuple| {
            let ordinates: Option<Position> = tuple
                .split(',')
                .map(|value| value.trim().parse::<f64>().ok())
                .collect();
            match ordinates {
                Some(mut position) if position.len() >= 2 => {
                    position.truncate(3);
                    Some(position)
                }
                _ => None,
            }
        })
        .collect()
}

fn placemark_properties(placemark: &XmlElement, styles: &StyleIndex) -> Properties {
    let mut properties = Properties::new();

    if let Some(name) = placemark.child_text("name") {
        properties.insert("name".to_string(), Value::String(name.to_string()));
    }
    if let Some(description) = placemark.child_text("description") {
        properties.insert(
            "description".to_string(),
            Value::String(description.to_string()),
        );
    }

    let mut style = ResolvedStyle::default();
    if let Some(url) = placemark.child_text("styleUrl") {
        if let Some(shared) = styles.resolve(url) {
            style.merge(shared);
        }
    }
    if let Some(inline) = placemark.child("Style") {
        style.merge(&parse_style(inline));
    }
    apply_style(&mut properties, &style);

    if let Some(extended) = placemark.child("ExtendedData") {
        for data in extended.children_named("Data") {
            if let (Some(key), Some(value)) =
                (data.attributes.get("name"), data.child_text("value"))
            {
                properties.insert(key.clone(), Value::String(value.to_string()));
            }
        }
    }

    properties
}

fn apply_style(properties: &mut Properties, style: &ResolvedStyle) {
    if let Some(stroke) = &style.stroke {
        properties.insert("stroke".to_string(), Value::String(stroke.clone()));
    }
    if let Some(width) = style.stroke_width {
        insert_number(properties, "stroke-width", width);
    }
    if let Some(opacity) = style.stroke_opacity {
        insert_number(properties, "stroke-opacity", opacity);
    }
    if let Some(fill) = &style.fill {
        properties.insert("fill".to_string(), Value::String(fill.clone()));
    }
    if let Some(opacity) = style.fill_opacity {
        insert_number(properties, "fill-opacity", opacity);
    }
    if let Some(icon) = &style.icon {
        properties.insert("icon".to_string(), Value::String(icon.clone()));
    }
}

fn insert_number(properties: &mut Properties, key: &str, value: f64) {
    if let Some(number) = serde_json::Number::from_f64(value) {
        properties.insert(key.to_string(), Value::Number(number));
    }
}

#[cfg(test)]
#[path = "tests/convert_tests.rs"]
mod tests;
