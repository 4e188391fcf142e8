//! Byte-to-text decoding with legacy-encoding recovery.

use crate::types::errors::{GeoError, GeoResult};

/// Decode document bytes: strict UTF-8 first, windows-1254 second.
///
/// The first pass must be strict. A lossy first decode would turn a
/// legacy-encoded document into mojibake instead of an error we can
/// fall back from. The fallback only fails on bytes windows-1254
/// leaves unmapped, which means the input is binary rather than text.
pub fn decode_text(bytes: &[u8]) -> GeoResult<String> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_owned()),
        Err(_) => {
            let (text, _encoding, had_errors) = encoding_rs::WINDOWS_1254.decode(bytes);
            if had_errors {
                return Err(GeoError::EncodingRecoveryFailed(
                    "not valid UTF-8 and not valid windows-1254 text".to_string(),
                ));
            }
            Ok(text.into_owned())
        }
    }
}

#[cfg(test)]
#[path = "tests/decode_tests.rs"]
mod tests;
