//! Watermark options.
//!
//! Options are an immutable value passed into each pipeline invocation,
//! never module state, so concurrent uploads cannot observe each
//! other's configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_OPACITY, DEFAULT_PADDING, DEFAULT_WIDTH_PERCENTAGE};

fn default_opacity() -> f32 {
    DEFAULT_OPACITY
}

fn default_padding() -> u32 {
    DEFAULT_PADDING
}

fn default_width_percentage() -> f32 {
    DEFAULT_WIDTH_PERCENTAGE
}

/// Options accepted by one watermark invocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WatermarkOptions {
    /// Blend opacity of the watermark draw, in (0.0, 1.0] (default: 0.4).
    /// Applies only to the watermark, never the base image.
    #[serde(default = "default_opacity")]
    pub opacity: f32,

    /// Padding in pixels (default: 20). Accepted for compatibility with
    /// the configuration surface; placement is centered and does not
    /// use it.
    #[serde(default = "default_padding")]
    pub padding: u32,

    /// Target watermark width as a percentage of the base image width,
    /// in (0.0, 100.0] (default: 60). Ignored when the base image has a
    /// transparent background; the light variant is forced to 80.
    #[serde(default = "default_width_percentage")]
    pub width_percentage: f32,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            opacity: default_opacity(),
            padding: default_padding(),
            width_percentage: default_width_percentage(),
        }
    }
}

impl WatermarkOptions {
    /// Validate the options.
    pub fn validate(&self) -> Result<(), String> {
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) || self.opacity == 0.0
        {
            return Err(format!(
                "Watermark opacity must be a finite value in (0.0, 1.0], got {}",
                self.opacity
            ));
        }

        if !self.width_percentage.is_finite()
            || !(0.0..=100.0).contains(&self.width_percentage)
            || self.width_percentage == 0.0
        {
            return Err(format!(
                "Watermark width_percentage must be a finite value in (0.0, 100.0], got {}",
                self.width_percentage
            ));
        }

        Ok(())
    }
}
