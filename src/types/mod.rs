pub mod errors;
pub mod geojson;
pub mod layer;
