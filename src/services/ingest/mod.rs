//! The ingestion pipeline: raw bytes plus a filename in, a validated
//! feature collection out.
//!
//! detect -> (extract) -> decode -> sanitize -> parse -> rehome ->
//! convert -> assemble. Per-document failures inside an archive are
//! logged and skipped; sibling documents keep going.

pub mod archive;
pub mod decode;
pub mod detect;
pub mod sanitize;

use crate::services::kml::convert::{convert_tree, NetworkLinkPolicy};
use crate::services::kml::rehome::{Rehomer, ResourceStore};
use crate::services::kml::tree::parse_tree;
use crate::types::errors::{GeoError, GeoResult};
use crate::types::geojson::{Feature, FeatureCollection};
use crate::types::layer::RehomedResource;

use archive::{read_kmz, ArchiveEntry};
use decode::decode_text;
use detect::{detect_file_kind, FileKind};
use sanitize::sanitize_document;

/// Pipeline policy knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Return an empty collection instead of failing when nothing is
    /// drawable. Batch loaders prefer not to abort a whole run over
    /// one empty file.
    pub allow_empty: bool,
    pub network_links: NetworkLinkPolicy,
}

/// A validated collection plus the archive resources it references.
#[derive(Debug)]
pub struct ParsedDocument {
    pub collection: FeatureCollection,
    pub resources: Vec<RehomedResource>,
}

/// Run the full ingestion pipeline on one file.
pub fn parse_file(
    bytes: &[u8],
    filename: &str,
    store: &mut dyn ResourceStore,
    options: &ParseOptions,
) -> GeoResult<ParsedDocument> {
    match detect_file_kind(filename) {
        FileKind::Kml => {
            let documents = vec![ArchiveEntry {
                path: filename.to_string(),
                bytes: bytes.to_vec(),
            }];
            run_pipeline(&documents, &[], store, options)
        }
        FileKind::Kmz => {
            let contents = read_kmz(bytes)?;
            run_pipeline(&contents.documents, &contents.resources, store, options)
        }
        FileKind::Unsupported => Err(GeoError::UnsupportedFormat(filename.to_string())),
    }
}

/// Convert every candidate document and merge the results, in
/// archive-listing order, applying the accept/reject policy.
fn run_pipeline(
    documents: &[ArchiveEntry],
    resources: &[ArchiveEntry],
    store: &mut dyn ResourceStore,
    options: &ParseOptions,
) -> GeoResult<ParsedDocument> {
    let mut rehomer = Rehomer::new(resources, store);
    let mut features: Vec<Feature> = Vec::new();
    let mut decode_failure: Option<GeoError> = None;

    for document in documents {
        match convert_document(document, &mut rehomer, options.network_links) {
            Ok(converted) => features.extend(converted),
            Err(error @ GeoError::NetworkLinkRejected) => return Err(error),
            Err(error) => {
                log::warn!("Skipping document {}: {error}", document.path);
                if matches!(error, GeoError::EncodingRecoveryFailed(_))
                    && decode_failure.is_none()
                {
                    decode_failure = Some(error);
                }
            }
        }
    }

    let collection = FeatureCollection::new(features);
    if !collection.is_drawable() {
        if options.allow_empty {
            return Ok(ParsedDocument {
                collection,
                resources: rehomer.into_rehomed(),
            });
        }
        // A lone document that failed decoding deserves the specific message
        if documents.len() == 1 {
            if let Some(error) = decode_failure {
                return Err(error);
            }
        }
        return Err(GeoError::NoDrawableContent);
    }

    Ok(ParsedDocument {
        collection,
        resources: rehomer.into_rehomed(),
    })
}

fn convert_document(
    document: &ArchiveEntry,
    rehomer: &mut Rehomer<'_, '_>,
    network_links: NetworkLinkPolicy,
) -> GeoResult<Vec<Feature>> {
    let text = decode_text(&document.bytes)?;
    let sanitized = sanitize_document(&text);
    let mut root = parse_tree(&sanitized)?;
    rehomer.rehome_tree(&mut root);
    convert_tree(&root, network_links)
}
