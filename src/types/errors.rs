use serde::Serialize;
use thiserror::Error;

/// Every fatal condition carries a message specific enough for a user
/// who cannot inspect the file themselves (remote-sourced input).
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Unsupported file format: {0}. Please provide a .kml or .kmz file")]
    UnsupportedFormat(String),
    #[error("KMZ archive is corrupted or was not fully downloaded: {0}")]
    CorruptArchive(String),
    #[error("Archive contains no readable KML document")]
    NoReadableDocument,
    #[error("File contains no drawable map content")]
    NoDrawableContent,
    #[error("Text encoding could not be recovered: {0}")]
    EncodingRecoveryFailed(String),
    #[error("Document references an external network link, which is not allowed")]
    NetworkLinkRejected,
    #[error("Failed to parse document structure: {0}")]
    StructuralParse(String),
}

impl From<zip::result::ZipError> for GeoError {
    fn from(error: zip::result::ZipError) -> Self {
        GeoError::CorruptArchive(error.to_string())
    }
}

impl From<quick_xml::Error> for GeoError {
    fn from(error: quick_xml::Error) -> Self {
        GeoError::StructuralParse(error.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for GeoError {
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        GeoError::StructuralParse(error.to_string())
    }
}

impl From<quick_xml::encoding::EncodingError> for GeoError {
    fn from(error: quick_xml::encoding::EncodingError) -> Self {
        GeoError::StructuralParse(error.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for GeoError {
    fn from(error: quick_xml::escape::EscapeError) -> Self {
        GeoError::StructuralParse(error.to_string())
    }
}

impl Serialize for GeoError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type GeoResult<T> = Result<T, GeoError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
