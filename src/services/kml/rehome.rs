//! Embedded-resource rehoming.
//!
//! KMZ documents reference bundled images either by full in-archive
//! path or by bare filename, depending on the authoring tool. Both
//! forms are rewritten to a loadable handle before conversion, so the
//! `icon` property resolves. The rewrite walks the parsed tree and
//! uses literal string replacement, full path before bare filename.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::services::ingest::archive::ArchiveEntry;
use crate::services::kml::tree::XmlElement;
use crate::types::layer::RehomedResource;

/// Materializes raw image bytes into loadable handles.
///
/// Injected so hosts can hand out object URLs, temp files or cache
/// keys. Handle release is driven by layer removal.
pub trait ResourceStore {
    fn materialize(&mut self, path: &str, bytes: &[u8]) -> String;
    fn release(&mut self, handle: &str);
}

/// Default store: self-contained `data:` URLs. Nothing to release.
#[derive(Debug, Default)]
pub struct DataUrlStore;

impl ResourceStore for DataUrlStore {
    fn materialize(&mut self, path: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime_for(path), STANDARD.encode(bytes))
    }

    fn release(&mut self, _handle: &str) {}
}

fn mime_for(path: &str) -> &'static str {
    let lower = path.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".gif") {
        "image/gif"
    } else if lower.ends_with(".bmp") {
        "image/bmp"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}

/// Rewrites in-document references for one archive parse.
///
/// Handles are materialized on first reference and cached, so a KMZ
/// with several documents yields one handle per image.
pub struct Rehomer<'a, 'b> {
    resources: &'a [ArchiveEntry],
    store: &'b mut dyn ResourceStore,
    rehomed: Vec<RehomedResource>,
}

impl<'a, 'b> Rehomer<'a, 'b> {
    pub fn new(resources: &'a [ArchiveEntry], store: &'b mut dyn ResourceStore) -> Self {
        Rehomer {
            resources,
            store,
            rehomed: Vec::new(),
        }
    }

    /// Replace every reference to an indexed image, by full path or by
    /// bare filename, throughout the element tree.
    pub fn rehome_tree(&mut self, root: &mut XmlElement) {
        let resources = self.resources;
        for resource in resources {
            let basename = resource.basename();
            if !tree_contains(root, &resource.path) && !tree_contains(root, basename) {
                continue;
            }
            let handle = self.handle_for(resource);
            replace_in_tree(root, &resource.path, &handle);
            if basename != resource.path {
                replace_in_tree(root, basename, &handle);
            }
        }
    }

    /// Resources actually referenced by any rehomed document.
    pub fn into_rehomed(self) -> Vec<RehomedResource> {
        self.rehomed
    }

    fn handle_for(&mut self, resource: &ArchiveEntry) -> String {
        if let Some(existing) = self
            .rehomed
            .iter()
            .find(|rehomed| rehomed.path == resource.path)
        {
            return existing.handle.clone();
        }
        let handle = self.store.materialize(&resource.path, &resource.bytes);
        self.rehomed.push(RehomedResource {
            path: resource.path.clone(),
            basename: resource.basename().to_string(),
            handle: handle.clone(),
        });
        handle
    }
}

fn tree_contains(element: &XmlElement, needle: &str) -> bool {
    element.text.contains(needle)
        || element.attributes.values().any(|value| value.contains(needle))
        || element
            .children
            .iter()
            .any(|child| tree_contains(child, needle))
}

fn replace_in_tree(element: &mut XmlElement, needle: &str, replacement: &str) {
    if element.text.contains(needle) {
        element.text = element.text.replace(needle, replacement);
    }
    for value in element.attributes.values_mut() {
        if value.contains(needle) {
            *value = value.replace(needle, replacement);
        }
    }
    for child in &mut element.children {
        replace_in_tree(child, needle, replacement);
    }
}

#[cfg(test)]
#[path = "tests/rehome_tests.rs"]
mod tests;
