//! Background transparency classifier.
//!
//! Decides which watermark variant to apply by sampling a fixed set of
//! pixel positions instead of scanning the whole image. This is a
//! documented speed/completeness tradeoff: a transparent region that
//! touches none of the sample points classifies as opaque.

use image::RgbaImage;

/// Fully opaque 8-bit alpha value.
const OPAQUE_ALPHA: u8 = 255;

/// Return the 8 fixed sample positions for a WxH image: the four
/// corners and the four edge midpoints.
///
/// Indices saturate, so images smaller than 2x2 are legal; several
/// positions simply coincide.
fn sample_points(width: u32, height: u32) -> [(u32, u32); 8] {
    let right = width.saturating_sub(1);
    let bottom = height.saturating_sub(1);
    let mid_x = width / 2;
    let mid_y = height / 2;

    [
        (0, 0),
        (right, 0),
        (0, bottom),
        (right, bottom),
        (mid_x, 0),
        (mid_x, bottom),
        (0, mid_y),
        (right, mid_y),
    ]
}

/// Classify whether an image has a transparent or near-transparent
/// background.
///
/// Returns `true` if the alpha channel at ANY of the 8 sampled
/// positions is below fully opaque. A single transparent corner is
/// sufficient. Always returns a definite answer; an image with all 8
/// samples fully opaque classifies as opaque.
pub fn has_transparent_background(image: &RgbaImage) -> bool {
    let (width, height) = image.dimensions();

    sample_points(width, height)
        .iter()
        .any(|&(x, y)| image.get_pixel(x, y)[3] < OPAQUE_ALPHA)
}
