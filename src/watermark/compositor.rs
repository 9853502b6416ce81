//! Alpha compositing of the brand mark onto the base image.
//!
//! The base image is drawn at native size; the scaled mark is blended
//! over it at the computed offset with a global opacity factor. The
//! blend region is clipped to the base bounds, so signed offsets from
//! oversized marks are legal. The base canvas is never resized.

use image::{Rgba, RgbaImage};

use super::placement::ScaledPlacement;

/// Blend the scaled watermark onto the base image in place.
///
/// The opacity factor applies only to the watermark draw, on top of the
/// watermark's own alpha channel. Pixels outside the base bounds are
/// skipped.
pub fn composite(
    base: &mut RgbaImage,
    watermark: &RgbaImage,
    placement: &ScaledPlacement,
    opacity: f32,
) {
    let base_width = base.width() as i32;
    let base_height = base.height() as i32;

    let wm_width = watermark.width() as i32;
    let wm_height = watermark.height() as i32;

    // Visible region, clamped to base bounds
    let x_start = placement.x.max(0);
    let y_start = placement.y.max(0);
    let x_end = (placement.x + wm_width).min(base_width);
    let y_end = (placement.y + wm_height).min(base_height);

    for by in y_start..y_end {
        for bx in x_start..x_end {
            let wx = (bx - placement.x) as u32;
            let wy = (by - placement.y) as u32;

            let wm_pixel = watermark.get_pixel(wx, wy);
            let base_pixel = base.get_pixel(bx as u32, by as u32);

            let blended = blend_pixels(*base_pixel, *wm_pixel, opacity);
            base.put_pixel(bx as u32, by as u32, blended);
        }
    }
}

/// Blend two pixels using alpha compositing with additional opacity.
///
/// Uses the "over" operator: result = foreground + background * (1 - foreground.alpha)
fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let fg_alpha = (foreground[3] as f32 / 255.0) * opacity.clamp(0.0, 1.0);
    let bg_alpha = background[3] as f32 / 255.0;

    // Porter-Duff "over" operator
    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0) as u8,
    ])
}
