//! Structural parsing of sanitized markup into a small element tree.
//!
//! Namespace prefixes are dropped from element and attribute names:
//! the sanitizer already strips `xmlns` declarations, and the
//! converter only interprets a small closed set of local names.

use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::types::errors::{GeoError, GeoResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<XmlElement>,
    pub text: String,
}

impl XmlElement {
    fn named(name: String) -> Self {
        XmlElement {
            name,
            ..XmlElement::default()
        }
    }

    /// First direct child with the given element name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Every direct child with the given element name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Trimmed concatenated text content of this element.
    pub fn text_trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Trimmed text of a direct child, if present and non-empty.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(|child| child.text_trimmed())
            .filter(|text| !text.is_empty())
    }
}

/// Parse sanitized markup into an element tree.
///
/// Returns a synthetic unnamed root wrapping the document's top-level
/// elements, so callers can walk without special-casing the root.
pub fn parse_tree(xml: &str) -> GeoResult<XmlElement> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut stack: Vec<XmlElement> = vec![XmlElement::default()];

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                stack.push(element_from_start(&e)?);
            }
            Event::Empty(e) => {
                let element = element_from_start(&e)?;
                attach(&mut stack, element);
            }
            Event::End(_) => {
                if stack.len() > 1 {
                    if let Some(element) = stack.pop() {
                        attach(&mut stack, element);
                    }
                }
            }
            Event::Text(t) => {
                let decoded = t.decode()?;
                let unescaped = quick_xml::escape::unescape(&decoded)
                    .map(|text| text.into_owned())
                    .ok();
                let text = unescaped.unwrap_or_else(|| decoded.into_owned());
                // Ignore indentation-only text nodes
                if !text.trim().is_empty() {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&text);
                    }
                }
            }
            Event::GeneralRef(e) => {
                let name = reader.decoder().decode(&e)?.into_owned();
                if let Some(top) = stack.last_mut() {
                    match resolve_entity(&name) {
                        Some(ch) => top.text.push(ch),
                        None => {
                            // Unknown entity: keep it visible rather than dropping text
                            top.text.push('&');
                            top.text.push_str(&name);
                            top.text.push(';');
                        }
                    }
                }
            }
            Event::CData(c) => {
                let text = c.decode()?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if stack.len() != 1 {
        return Err(GeoError::StructuralParse(
            "document ended with unclosed elements".to_string(),
        ));
    }
    Ok(stack.swap_remove(0))
}

fn element_from_start(e: &BytesStart<'_>) -> GeoResult<XmlElement> {
    let mut element = XmlElement::named(local_name(e.name().as_ref())?);
    for attr in e.attributes() {
        let attr = attr?;
        let key = local_name(attr.key.as_ref())?;
        let value = attr.unescape_value()?.to_string();
        element.attributes.insert(key, value);
    }
    Ok(element)
}

fn attach(stack: &mut Vec<XmlElement>, element: XmlElement) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    }
}

fn local_name(raw: &[u8]) -> GeoResult<String> {
    let full = std::str::from_utf8(raw).map_err(|e| GeoError::StructuralParse(e.to_string()))?;
    Ok(full.rsplit(':').next().unwrap_or(full).to_string())
}

/// Resolve the five predefined XML entities and numeric character
/// references like `#246` or `#xF6`.
fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
