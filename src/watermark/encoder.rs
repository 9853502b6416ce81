//! Re-encoding of the composed surface.
//!
//! The output is always encoded to the SAME kind as the source image:
//! a JPEG upload stays a JPEG, a PNG stays a PNG. JPEG uses a fixed
//! quality setting; PNG and WebP are lossless with the `image` crate's
//! encoders.

use std::io::Cursor;

use image::RgbaImage;

use super::error::WatermarkError;
use super::format::ImageKind;
use crate::constants::JPEG_QUALITY;

/// Encode a composed RGBA surface to the given kind.
///
/// # Errors
///
/// Returns `WatermarkError::Encode` if the underlying encoder fails.
pub fn encode(image: &RgbaImage, kind: ImageKind) -> Result<Vec<u8>, WatermarkError> {
    let (width, height) = image.dimensions();

    match kind {
        ImageKind::Jpeg => encode_jpeg(image.as_raw(), width, height),
        ImageKind::Png => encode_png(image.as_raw(), width, height),
        ImageKind::WebP => encode_webp(image.as_raw(), width, height),
    }
}

fn encode_jpeg(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, WatermarkError> {
    use image::codecs::jpeg::JpegEncoder;
    use image::ImageEncoder as _;

    // JPEG has no alpha channel
    let rgb_data = rgba_to_rgb(data);

    let mut output = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut output, JPEG_QUALITY);

    encoder
        .write_image(&rgb_data, width, height, image::ColorType::Rgb8)
        .map_err(|e| WatermarkError::encode("jpeg", e.to_string()))?;

    Ok(output.into_inner())
}

fn encode_png(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, WatermarkError> {
    use image::codecs::png::PngEncoder;
    use image::ImageEncoder as _;

    let mut output = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut output);

    encoder
        .write_image(data, width, height, image::ColorType::Rgba8)
        .map_err(|e| WatermarkError::encode("png", e.to_string()))?;

    Ok(output.into_inner())
}

fn encode_webp(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, WatermarkError> {
    use image::codecs::webp::WebPEncoder;
    use image::ImageEncoder as _;

    let mut output = Cursor::new(Vec::new());
    let encoder = WebPEncoder::new_lossless(&mut output);

    encoder
        .write_image(data, width, height, image::ColorType::Rgba8)
        .map_err(|e| WatermarkError::encode("webp", e.to_string()))?;

    Ok(output.into_inner())
}

/// Convert RGBA to RGB by discarding the alpha channel.
fn rgba_to_rgb(rgba: &[u8]) -> Vec<u8> {
    let pixel_count = rgba.len() / 4;
    let mut rgb = Vec::with_capacity(pixel_count * 3);

    for chunk in rgba.chunks_exact(4) {
        rgb.push(chunk[0]);
        rgb.push(chunk[1]);
        rgb.push(chunk[2]);
    }

    rgb
}
