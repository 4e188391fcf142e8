//! KML style resolution: shared styles, style maps, color conversion.

use std::collections::BTreeMap;

use crate::services::kml::tree::XmlElement;

/// Drawable attributes extracted from a `<Style>` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedStyle {
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub stroke_opacity: Option<f64>,
    pub fill: Option<String>,
    pub fill_opacity: Option<f64>,
    pub icon: Option<String>,
}

impl ResolvedStyle {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(&mut self, other: &ResolvedStyle) {
        if other.stroke.is_some() {
            self.stroke = other.stroke.clone();
        }
        if other.stroke_width.is_some() {
            self.stroke_width = other.stroke_width;
        }
        if other.stroke_opacity.is_some() {
            self.stroke_opacity = other.stroke_opacity;
        }
        if other.fill.is_some() {
            self.fill = other.fill.clone();
        }
        if other.fill_opacity.is_some() {
            self.fill_opacity = other.fill_opacity;
        }
        if other.icon.is_some() {
            self.icon = other.icon.clone();
        }
    }
}

/// Shared styles indexed by id, with `<StyleMap>` normal pairs resolved.
#[derive(Debug, Default)]
pub struct StyleIndex {
    styles: BTreeMap<String, ResolvedStyle>,
}

impl StyleIndex {
    /// Collect every `<Style id>` and `<StyleMap id>` in the document.
    pub fn build(root: &XmlElement) -> StyleIndex {
        let mut index = StyleIndex::default();
        collect_styles(root, &mut index.styles);

        let mut maps = Vec::new();
        collect_style_maps(root, &mut maps);
        for (id, target) in maps {
            if let Some(style) = index.styles.get(target.trim_start_matches('#')).cloned() {
                index.styles.insert(id, style);
            }
        }
        index
    }

    /// Look up a `<styleUrl>` target like `#line-style`.
    pub fn resolve(&self, style_url: &str) -> Option<&ResolvedStyle> {
        self.styles.get(style_url.trim_start_matches('#'))
    }
}

fn collect_styles(element: &XmlElement, out: &mut BTreeMap<String, ResolvedStyle>) {
    if element.name == "Style" {
        if let Some(id) = element.attributes.get("id") {
            out.insert(id.clone(), parse_style(element));
        }
    }
    for child in &element.children {
        collect_styles(child, out);
    }
}

fn collect_style_maps(element: &XmlElement, out: &mut Vec<(String, String)>) {
    if element.name == "StyleMap" {
        if let Some(id) = element.attributes.get("id") {
            // The normal pair drives rendering; highlight has no meaning here
            let normal = element
                .children_named("Pair")
                .find(|pair| pair.child_text("key") == Some("normal"));
            if let Some(url) = normal.and_then(|pair| pair.child_text("styleUrl")) {
                out.push((id.clone(), url.to_string()));
            }
        }
    }
    for child in &element.children {
        collect_style_maps(child, out);
    }
}

/// Extract drawable attributes from a `<Style>` element.
pub fn parse_style(style: &XmlElement) -> ResolvedStyle {
    let mut resolved = ResolvedStyle::default();

    if let Some(line) = style.child("LineStyle") {
        if let Some((color, opacity)) = line.child_text("color").and_then(kml_color) {
            resolved.stroke = Some(color);
            resolved.stroke_opacity = opacity;
        }
        if let Some(width) = line
            .child_text("width")
            .and_then(|width| width.parse::<f64>().ok())
        {
            resolved.stroke_width = Some(width);
        }
    }

    if let Some(poly) = style.child("PolyStyle") {
        if let Some((color, opacity)) = poly.child_text("color").and_then(kml_color) {
            resolved.fill = Some(color);
            resolved.fill_opacity = opacity;
        }
        if poly.child_text("fill") == Some("0") {
            resolved.fill_opacity = Some(0.0);
        }
    }

    if let Some(href) = style
        .child("IconStyle")
        .and_then(|icon_style| icon_style.child("Icon"))
        .and_then(|icon| icon.child_text("href"))
    {
        resolved.icon = Some(href.to_string());
    }

    resolved
}

/// Convert a KML `aabbggrr` (or `bbggrr`) hex color to `#rrggbb` plus
/// an opacity in `[0, 1]`.
pub fn kml_color(value: &str) -> Option<(String, Option<f64>)> {
    let hex = value.trim();
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        8 => {
            let alpha = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let rgb = format!("#{}{}{}", &hex[6..8], &hex[4..6], &hex[2..4]).to_lowercase();
            Some((rgb, Some(f64::from(alpha) / 255.0)))
        }
        6 => {
            let rgb = format!("#{}{}{}", &hex[4..6], &hex[2..4], &hex[0..2]).to_lowercase();
            Some((rgb, None))
        }
        _ => None,
    }
}
