//! Markup repair before structural parsing.
//!
//! Real-world KML is frequently hand-edited or produced by sloppy
//! exporters. The sanitizer neutralizes the constructs that would
//! abort a structural parse outright, so the converter can work on a
//! predictable document.

use regex::Regex;
use std::sync::LazyLock;

/// XML comments, multi-line included.
static RE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));

/// Processing instructions, the XML declaration included.
static RE_PROC_INST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<\?.*?\?>").expect("valid PI regex"));

/// `xmlns` / `xmlns:prefix` declarations, double- or single-quoted.
static RE_XMLNS_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s+xmlns(?::[A-Za-z_][A-Za-z0-9_.-]*)?\s*=\s*("[^"]*"|'[^']*')"#)
        .expect("valid xmlns regex")
});

/// Every `&`, capturing the entity body when a recognized one follows.
static RE_AMPERSAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:(amp|lt|gt|quot|apos|#[0-9]{1,7}|#x[0-9a-fA-F]{1,6});)?")
        .expect("valid ampersand regex")
});

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// Repair a decoded document so the structural parser accepts it.
///
/// In order: BOM strip, comment removal, processing-instruction
/// removal, namespace-declaration stripping, then escaping of any `&`
/// that does not start a recognized character entity. CDATA sections
/// pass through untouched, their content is literal.
pub fn sanitize_document(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    transform_outside_cdata(text, |segment| {
        let segment = RE_COMMENT.replace_all(segment, "");
        let segment = RE_PROC_INST.replace_all(&segment, "");
        let segment = RE_XMLNS_DECL.replace_all(&segment, "");
        escape_bare_ampersands(&segment)
    })
}

/// Escape `&` characters that do not start a recognized entity.
///
/// Bare ampersands are a common authoring error (`Ali & Veli`) that
/// would otherwise abort structural parsing entirely.
fn escape_bare_ampersands(segment: &str) -> String {
    RE_AMPERSAND
        .replace_all(segment, |caps: &regex::Captures<'_>| {
            if caps.get(1).is_some() {
                caps[0].to_string()
            } else {
                "&amp;".to_string()
            }
        })
        .into_owned()
}

/// Apply `transform` to the stretches of `text` outside CDATA sections.
fn transform_outside_cdata(text: &str, transform: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find(CDATA_OPEN) {
        out.push_str(&transform(&rest[..open]));
        let tail = &rest[open..];
        match tail.find(CDATA_CLOSE) {
            Some(close) => {
                let end = close + CDATA_CLOSE.len();
                out.push_str(&tail[..end]);
                rest = &tail[end..];
            }
            None => {
                // Unterminated CDATA: keep as-is, the parser will report it.
                out.push_str(tail);
                return out;
            }
        }
    }
    out.push_str(&transform(rest));
    out
}

#[cfg(test)]
#[path = "tests/sanitize_tests.rs"]
mod tests;
