//! Map layer model shared between the pipeline and its consumers.

use serde::{Deserialize, Serialize};

use crate::types::geojson::FeatureCollection;

/// An embedded archive image rewritten to a loadable handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RehomedResource {
    /// Path of the entry inside the archive.
    pub path: String,
    /// Bare filename, matched when documents reference media by name only.
    pub basename: String,
    /// Loadable handle the references were rewritten to.
    pub handle: String,
}

/// One loaded layer as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayer {
    pub id: String,
    pub name: String,
    pub visible: bool,
    pub data: FeatureCollection,
    pub color: String,
    /// Handles owned by this layer, released when the layer is removed.
    pub resources: Vec<RehomedResource>,
}
