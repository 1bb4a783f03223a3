//! Transport-safe encoding of image bytes.
//!
//! The model API takes image data as bare standard base64 inside a JSON
//! body. Encoding is lossless both ways.

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Encode raw image bytes into the base64 transport form.
pub fn encode_image(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode the base64 transport form back into raw bytes.
pub fn decode_image(data: &str) -> Result<Vec<u8>, TransportError> {
    Ok(STANDARD.decode(data)?)
}
