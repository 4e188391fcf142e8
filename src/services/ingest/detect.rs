//! Input classification by filename.

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Kml,
    Kmz,
    Unsupported,
}

/// Classify a filename, ignoring any trailing query fragment.
///
/// Remote sources often hand over names like `parkur.kmz?raw=true`.
pub fn detect_file_kind(filename: &str) -> FileKind {
    let clean = filename
        .split('?')
        .next()
        .unwrap_or(filename)
        .to_lowercase();

    if clean.ends_with(".kml") {
        FileKind::Kml
    } else if clean.ends_with(".kmz") {
        FileKind::Kmz
    } else {
        FileKind::Unsupported
    }
}

#[cfg(test)]
#[path = "tests/detect_tests.rs"]
mod tests;
