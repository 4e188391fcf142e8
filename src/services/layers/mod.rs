//! Layer collection management for pipeline consumers.

pub mod palette;

use std::collections::HashSet;

use uuid::Uuid;

use crate::services::ingest::ParsedDocument;
use crate::services::kml::rehome::ResourceStore;
use crate::types::layer::MapLayer;

use palette::ColorAllocator;

/// Mint a visible layer from a parsed document.
pub fn build_layer(
    name: &str,
    parsed: ParsedDocument,
    colors: &mut dyn ColorAllocator,
) -> MapLayer {
    MapLayer {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        visible: true,
        data: parsed.collection,
        color: colors.next_color(),
        resources: parsed.resources,
    }
}

/// Ordered set of loaded layers.
///
/// Concurrent batch loaders funnel completions through
/// `append_unique` under their own lock: read existing ids, drop
/// duplicates, append.
#[derive(Debug, Default)]
pub struct LayerSet {
    layers: Vec<MapLayer>,
}

impl LayerSet {
    pub fn new() -> Self {
        LayerSet::default()
    }

    pub fn layers(&self) -> &[MapLayer] {
        &self.layers
    }

    pub fn get(&self, id: &str) -> Option<&MapLayer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    /// Append layers whose id is not already present. Returns how many
    /// were actually added.
    pub fn append_unique(&mut self, incoming: Vec<MapLayer>) -> usize {
        let mut seen: HashSet<String> = self.layers.iter().map(|layer| layer.id.clone()).collect();
        let mut added = 0;
        for layer in incoming {
            if !seen.insert(layer.id.clone()) {
                log::info!("Skipping duplicate layer {}", layer.id);
                continue;
            }
            self.layers.push(layer);
            added += 1;
        }
        added
    }

    /// Remove a layer and release its rehomed resource handles.
    pub fn remove(&mut self, id: &str, store: &mut dyn ResourceStore) -> bool {
        let Some(index) = self.layers.iter().position(|layer| layer.id == id) else {
            return false;
        };
        let layer = self.layers.remove(index);
        for resource in &layer.resources {
            store.release(&resource.handle);
        }
        true
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        match self.layers.iter_mut().find(|layer| layer.id == id) {
            Some(layer) => {
                layer.visible = visible;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "tests/layer_tests.rs"]
mod tests;
