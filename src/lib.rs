//! KML/KMZ ingestion into GeoJSON-shaped feature collections, plus
//! spatial relation analysis between map layers.
//!
//! The pipeline runs format detection, archive extraction, text
//! decoding with legacy-encoding fallback, markup sanitization,
//! structural parsing, embedded-resource rehoming, feature conversion
//! and collection assembly. Rendering, remote fetch and UI state are
//! the caller's business.

pub mod services;
pub mod types;

pub use services::ingest::{parse_file, ParseOptions, ParsedDocument};
pub use types::errors::{GeoError, GeoResult};
