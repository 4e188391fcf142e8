use super::*;

#[test]
fn test_sanitize_strips_bom() {
    let sanitized = sanitize_document("\u{feff}<kml></kml>");
    assert_eq!(sanitized, "<kml></kml>");
}

#[test]
fn test_sanitize_removes_comments_and_instructions() {
    let input = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<kml><!-- editor\nnote --><Placemark/></kml>";
    let sanitized = sanitize_document(input);
    assert!(!sanitized.contains("<?xml"));
    assert!(!sanitized.contains("editor"));
    assert!(sanitized.contains("<Placemark/>"));
}

#[test]
fn test_sanitize_strips_namespace_declarations() {
    let input = r#"<kml xmlns="http://www.opengis.net/kml/2.2" xmlns:gx='http://www.google.com/kml/ext/2.2'><Document/></kml>"#;
    let sanitized = sanitize_document(input);
    assert!(!sanitized.contains("xmlns"));
    assert!(sanitized.contains("<kml>"));
    assert!(sanitized.contains("<Document/>"));
}

#[test]
fn test_sanitize_escapes_bare_ampersand() {
    let sanitized = sanitize_document("<name>Ali & Veli</name>");
    assert_eq!(sanitized, "<name>Ali &amp; Veli</name>");
}

#[test]
fn test_sanitize_keeps_recognized_entities() {
    let input = "<name>Ali &amp; Veli &lt;A&gt; &#246; &#xF6; &quot;q&quot; &apos;a&apos;</name>";
    assert_eq!(sanitize_document(input), input);
}

#[test]
fn test_sanitize_escapes_unknown_entity() {
    // &nbsp; is HTML, not XML; escaping it keeps the parser alive
    let sanitized = sanitize_document("<name>a&nbsp;b</name>");
    assert_eq!(sanitized, "<name>a&amp;nbsp;b</name>");
}

#[test]
fn test_sanitize_leaves_cdata_alone() {
    let input = "<description><![CDATA[Ali & Veli <!-- not a comment --> <?not-a-pi?>]]></description>";
    assert_eq!(sanitize_document(input), input);
}

#[test]
fn test_sanitize_mixed_cdata_and_text() {
    let input = "<d>A & B<![CDATA[C & D]]>E & F</d>";
    assert_eq!(
        sanitize_document(input),
        "<d>A &amp; B<![CDATA[C & D]]>E &amp; F</d>"
    );
}

#[test]
fn test_sanitize_unterminated_cdata_passes_through() {
    let input = "<d><![CDATA[open & never closed</d>";
    assert_eq!(sanitize_document(input), input);
}
