//! Seed-image normalization and PNG re-encoding.
//!
//! The diffusion pipeline expects its seed at a fixed square resolution in
//! RGB, and every image leaving the service is PNG. Uploads arrive in
//! whatever format and size the client produced, so both directions go
//! through the helpers here.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};

use decora_types::error::GenerationError;

/// PNG file signature.
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Decode an uploaded seed image, normalize it to RGB, resize it exactly to
/// `size`x`size`, and re-encode it as PNG.
///
/// Resizing is exact (no aspect-ratio preservation): the pipeline requires
/// the canonical resolution regardless of the upload's dimensions.
pub fn normalize_seed(bytes: &[u8], size: u32) -> Result<Vec<u8>, GenerationError> {
    let decoded = decode(bytes)?;
    let resized = DynamicImage::ImageRgb8(decoded.to_rgb8())
        .resize_exact(size, size, FilterType::Lanczos3);
    encode_png(&resized)
}

/// Ensure generated image bytes are PNG-encoded.
///
/// Backends normally hand back PNG already; anything else is decoded and
/// re-encoded so the HTTP layer can always claim `image/png`.
pub fn ensure_png(bytes: Vec<u8>) -> Result<Vec<u8>, GenerationError> {
    if bytes.starts_with(PNG_MAGIC) {
        return Ok(bytes);
    }
    let decoded = decode(&bytes)?;
    encode_png(&decoded)
}

fn decode(bytes: &[u8]) -> Result<DynamicImage, GenerationError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| GenerationError::Image(format!("unreadable image data: {e}")))?
        .decode()
        .map_err(|e| GenerationError::Image(format!("image decode failed: {e}")))
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, GenerationError> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| GenerationError::Image(format!("PNG encode failed: {e}")))?;
    Ok(out.into_inner())
}
