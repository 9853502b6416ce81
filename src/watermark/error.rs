//! Watermark pipeline error types.
//!
//! Errors are local to a single file's pipeline run. A failure in one
//! upload never affects sibling uploads processed concurrently.

use std::fmt;

/// Errors that can occur while watermarking one image.
#[derive(Debug, Clone)]
pub enum WatermarkError {
    /// Declared media type is not handled by this pipeline
    UnsupportedFormat { media_type: String },

    /// Source bytes cannot be decoded as an image
    Decode { message: String },

    /// Watermark asset could not be fetched or decoded.
    /// The pipeline never falls back to an unwatermarked output.
    AssetLoad { message: String },

    /// Re-encoding the composed surface failed
    Encode { format: String, message: String },

    /// Invalid options or asset configuration
    Config { message: String },
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatermarkError::UnsupportedFormat { media_type } => {
                write!(f, "Unsupported media type: {}", media_type)
            }
            WatermarkError::Decode { message } => {
                write!(f, "Failed to decode source image: {}", message)
            }
            WatermarkError::AssetLoad { message } => {
                write!(f, "Failed to load watermark asset: {}", message)
            }
            WatermarkError::Encode { format, message } => {
                write!(f, "Failed to encode to {}: {}", format, message)
            }
            WatermarkError::Config { message } => {
                write!(f, "Watermark configuration error: {}", message)
            }
        }
    }
}

impl std::error::Error for WatermarkError {}

impl WatermarkError {
    /// Helper constructors for common error patterns
    pub fn unsupported_format(media_type: impl Into<String>) -> Self {
        WatermarkError::UnsupportedFormat {
            media_type: media_type.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        WatermarkError::Decode {
            message: message.into(),
        }
    }

    pub fn asset_load(message: impl Into<String>) -> Self {
        WatermarkError::AssetLoad {
            message: message.into(),
        }
    }

    pub fn encode(format: impl Into<String>, message: impl Into<String>) -> Self {
        WatermarkError::Encode {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        WatermarkError::Config {
            message: message.into(),
        }
    }
}
