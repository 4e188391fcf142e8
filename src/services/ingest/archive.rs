//! KMZ archive enumeration and entry selection.

use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::types::errors::{GeoError, GeoResult};

/// Conventional primary document name inside a KMZ.
const DEFAULT_DOCUMENT_NAME: &str = "doc.kml";
/// Candidate documents are selected by this suffix.
const DOCUMENT_SUFFIX: &str = ".kml";
/// Raster formats indexed for icon rehoming.
const IMAGE_SUFFIXES: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".bmp", ".webp"];
/// OS metadata artifacts, never candidates nor resources.
const METADATA_DIR: &str = "__MACOSX";
const HIDDEN_PREFIX: &str = "._";

/// One extracted archive entry.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub path: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    /// Final path component.
    pub fn basename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Candidate documents and indexed image resources of one archive.
#[derive(Debug, Default)]
pub struct KmzContents {
    pub documents: Vec<ArchiveEntry>,
    pub resources: Vec<ArchiveEntry>,
}

/// Open a KMZ and select its candidate documents and image resources.
///
/// Selection strategies, first hit wins:
/// 1. the entry whose base name equals `doc.kml`, case-insensitively
/// 2. every `.kml` entry, in archive-listing order
/// 3. none left means the archive has nothing we can draw
pub fn read_kmz(bytes: &[u8]) -> GeoResult<KmzContents> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut kml_entries: Vec<ArchiveEntry> = Vec::new();
    let mut resources: Vec<ArchiveEntry> = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let path = entry.name().replace('\\', "/");
        if is_metadata_entry(&path) {
            continue;
        }

        let lower = path.to_lowercase();
        let is_document = lower.ends_with(DOCUMENT_SUFFIX);
        let is_image = IMAGE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix));
        if !is_document && !is_image {
            continue;
        }

        let mut content = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut content)
            .map_err(|e| GeoError::CorruptArchive(format!("failed to read {path}: {e}")))?;
        let extracted = ArchiveEntry {
            path,
            bytes: content,
        };

        if is_document {
            kml_entries.push(extracted);
        } else {
            resources.push(extracted);
        }
    }

    let documents = select_candidates(kml_entries)?;
    Ok(KmzContents {
        documents,
        resources,
    })
}

fn select_candidates(kml_entries: Vec<ArchiveEntry>) -> GeoResult<Vec<ArchiveEntry>> {
    if kml_entries.is_empty() {
        return Err(GeoError::NoReadableDocument);
    }
    if let Some(primary) = kml_entries
        .iter()
        .position(|entry| entry.basename().eq_ignore_ascii_case(DEFAULT_DOCUMENT_NAME))
    {
        let mut entries = kml_entries;
        return Ok(vec![entries.swap_remove(primary)]);
    }
    Ok(kml_entries)
}

/// OS metadata: anything under `__MACOSX/` or with a `._` base name.
fn is_metadata_entry(path: &str) -> bool {
    let basename = path.rsplit('/').next().unwrap_or(path);
    basename.starts_with(HIDDEN_PREFIX)
        || path
            .split('/')
            .any(|component| component == METADATA_DIR)
}

#[cfg(test)]
#[path = "tests/archive_tests.rs"]
mod tests;
