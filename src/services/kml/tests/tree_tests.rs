use super::*;
use crate::types::errors::GeoError;

#[test]
fn test_parse_nested_elements() {
    let root = parse_tree("<kml><Document><Placemark><name>Tepe</name></Placemark></Document></kml>")
        .unwrap();
    let kml = root.child("kml").unwrap();
    let placemark = kml.child("Document").unwrap().child("Placemark").unwrap();
    assert_eq!(placemark.child_text("name"), Some("Tepe"));
}

#[test]
fn test_parse_attributes_and_empty_elements() {
    let root = parse_tree(r#"<Document><Data name="hiz" source="gps"/></Document>"#).unwrap();
    let data = root.child("Document").unwrap().child("Data").unwrap();
    assert_eq!(data.attributes.get("name").map(String::as_str), Some("hiz"));
    assert_eq!(
        data.attributes.get("source").map(String::as_str),
        Some("gps")
    );
    assert!(data.children.is_empty());
}

#[test]
fn test_parse_strips_namespace_prefixes() {
    let root =
        parse_tree("<kml:Document><gx:Tour><name>t</name></gx:Tour></kml:Document>").unwrap();
    let document = root.child("Document").unwrap();
    assert_eq!(document.child("Tour").unwrap().child_text("name"), Some("t"));
}

#[test]
fn test_text_and_cdata_concatenate() {
    let root = parse_tree("<d>hello <![CDATA[& <world>]]></d>").unwrap();
    assert_eq!(root.child("d").unwrap().text_trimmed(), "hello & <world>");
}

#[test]
fn test_entities_resolve_in_text() {
    let root = parse_tree("<name>Ali &amp; Veli &#246;z &lt;n&gt;</name>").unwrap();
    assert_eq!(
        root.child("name").unwrap().text_trimmed(),
        "Ali & Veli öz <n>"
    );
}

#[test]
fn test_entities_resolve_in_attributes() {
    let root = parse_tree(r#"<Data value="a &amp; b"/>"#).unwrap();
    assert_eq!(
        root.child("Data").unwrap().attributes.get("value").unwrap(),
        "a & b"
    );
}

#[test]
fn test_indentation_only_text_is_dropped() {
    let root = parse_tree("<a>\n  <b>x</b>\n</a>").unwrap();
    let a = root.child("a").unwrap();
    assert_eq!(a.text_trimmed(), "");
    assert_eq!(a.child_text("b"), Some("x"));
}

#[test]
fn test_mismatched_tags_fail_structurally() {
    let result = parse_tree("<a><b></a>");
    assert!(matches!(result, Err(GeoError::StructuralParse(_))));
}

#[test]
fn test_coordinates_text_survives_whitespace() {
    let root = parse_tree("<LineString><coordinates>\n 30,40\n 31,41 \n</coordinates></LineString>")
        .unwrap();
    let coordinates = root
        .child("LineString")
        .unwrap()
        .child_text("coordinates")
        .unwrap();
    assert!(coordinates.contains("30,40"));
    assert!(coordinates.contains("31,41"));
}
