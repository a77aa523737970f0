//! Decoding of browser camera captures (`data:image/...;base64,<payload>`).

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{DynamicImage, ImageFormat};

use crate::attendance::service::AttendanceError;

/// Decodes a data URL into a colour JPEG suitable for the face service.
///
/// Any decodable image format is accepted; the alpha channel is dropped.
pub fn decode_capture(data_url: &str) -> Result<Vec<u8>, AttendanceError> {
    let (_, payload) = data_url
        .split_once(',')
        .ok_or_else(|| AttendanceError::Malformed("image must be a base64 data URL".to_string()))?;

    let raw = BASE64
        .decode(payload.trim())
        .map_err(|e| AttendanceError::Malformed(format!("invalid base64 image payload: {e}")))?;

    let decoded = image::load_from_memory(&raw)?;
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());

    let mut jpeg = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)?;
    Ok(jpeg)
}
