//! Watermark variant selection, scaling, and centered placement.
//!
//! Selection picks between the two brand-mark variants based on the
//! transparency classification; the light variant forces a wider mark
//! for visibility against transparent backgrounds. Scaling preserves
//! the asset's aspect ratio exactly; there is no independent height
//! control. Placement is centered only.

use crate::constants::TRANSPARENT_WIDTH_PERCENTAGE;

/// The two preselected brand-mark assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatermarkVariant {
    /// Standard-contrast mark for opaque backgrounds.
    Standard,
    /// Light/white-contrast mark for transparent backgrounds.
    Light,
}

impl WatermarkVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Light => "light",
        }
    }
}

/// Base image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Scaled watermark size and centered offset within the base image.
///
/// Offsets are signed: a watermark taller than the base yields a
/// negative y and the compositor clips the blend to the base bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledPlacement {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

/// Select the watermark variant and effective width percentage.
///
/// A transparent background selects the light variant and overrides the
/// caller's width percentage with the fixed 80% value; otherwise the
/// standard variant uses the caller's percentage unchanged.
pub fn select_variant(has_transparency: bool, width_percentage: f32) -> (WatermarkVariant, f32) {
    if has_transparency {
        (WatermarkVariant::Light, TRANSPARENT_WIDTH_PERCENTAGE)
    } else {
        (WatermarkVariant::Standard, width_percentage)
    }
}

/// Compute the scaled watermark size and centered offset.
///
/// Target width is `base.width * pct / 100`; height follows from the
/// asset's native aspect ratio. Both dimensions have a 1px floor so
/// degenerate inputs still produce a drawable mark.
pub fn compute_placement(
    base: ImageDimensions,
    asset_width: u32,
    asset_height: u32,
    width_percentage: f32,
) -> ScaledPlacement {
    let target_width = (base.width as f32 * width_percentage / 100.0).round() as u32;
    let target_width = target_width.max(1);

    let scale = target_width as f32 / asset_width.max(1) as f32;
    let target_height = ((asset_height as f32 * scale).round() as u32).max(1);

    ScaledPlacement {
        width: target_width,
        height: target_height,
        x: (base.width as i32 - target_width as i32) / 2,
        y: (base.height as i32 - target_height as i32) / 2,
    }
}
