//! Source image kind handling.
//!
//! The upload caller declares a media type for each file. The pipeline
//! re-encodes the composed result to the SAME kind as the source; the
//! kind must therefore be resolved before any decoding happens so an
//! unsupported type fails early with a clear error.

use std::str::FromStr;

use super::error::WatermarkError;

/// Supported source/output image kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Jpeg,
    Png,
    WebP,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }

    /// Content-Type value for upload metadata.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }

    /// File extension used when generating object keys.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }

    /// Resolve a kind from a declared media type (e.g. "image/jpeg").
    ///
    /// # Errors
    ///
    /// Returns `WatermarkError::UnsupportedFormat` for any media type
    /// outside the supported set.
    pub fn from_media_type(media_type: &str) -> Result<Self, WatermarkError> {
        match media_type.to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Ok(ImageKind::Jpeg),
            "image/png" => Ok(ImageKind::Png),
            "image/webp" => Ok(ImageKind::WebP),
            _ => Err(WatermarkError::unsupported_format(media_type)),
        }
    }

    /// Guess a kind from a filename extension. Used by the CLI when no
    /// media type is declared alongside the file.
    pub fn from_extension(ext: &str) -> Result<Self, WatermarkError> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(ImageKind::Jpeg),
            "png" => Ok(ImageKind::Png),
            "webp" => Ok(ImageKind::WebP),
            _ => Err(WatermarkError::unsupported_format(format!(".{}", ext))),
        }
    }
}

impl FromStr for ImageKind {
    type Err = WatermarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(ImageKind::Jpeg),
            "png" => Ok(ImageKind::Png),
            "webp" => Ok(ImageKind::WebP),
            _ => Err(WatermarkError::unsupported_format(s)),
        }
    }
}
