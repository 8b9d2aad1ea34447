//! Base64 screenshot payload decoding.

use crate::errors::OcrError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;

/// A decoded image and its sniffed format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

/// Decodes a base64 image, optionally prefixed with a `data:<mime>;base64,` marker.
///
/// ASCII whitespace inside the payload is ignored, since clients often wrap
/// long base64 strings.
pub fn decode_image_payload(payload: &str) -> Result<ImagePayload, OcrError> {
    let encoded = strip_data_uri(payload.trim())?;
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if compact.is_empty() {
        return Err(OcrError::EmptyImage);
    }

    let bytes = STANDARD.decode(compact.as_bytes())?;
    if bytes.is_empty() {
        return Err(OcrError::EmptyImage);
    }

    let format = image::guess_format(&bytes).map_err(|_| OcrError::UnsupportedImage)?;
    Ok(ImagePayload { bytes, format })
}

fn strip_data_uri(payload: &str) -> Result<&str, OcrError> {
    if !payload.contains("data:") {
        return Ok(payload);
    }
    payload
        .split_once(',')
        .map(|(_, data)| data)
        .ok_or_else(|| OcrError::InvalidPayload("data URI has no ',' separator".to_string()))
}
