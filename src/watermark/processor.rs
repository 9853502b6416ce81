//! The watermark pipeline.
//!
//! One invocation is a straight-line transform over a single source
//! image: decode, classify background transparency, select the brand
//! mark variant and width, load the asset, scale it, composite it
//! centered, and re-encode to the source's own format. There is no
//! retry loop and no state shared between invocations; concurrent
//! uploads each run their own pipeline with their own buffers.

use image::imageops::FilterType;
use image::RgbaImage;

use super::assets::AssetLoader;
use super::classifier::has_transparent_background;
use super::compositor::composite;
use super::config::WatermarkOptions;
use super::error::WatermarkError;
use super::format::ImageKind;
use super::placement::{compute_placement, select_variant, ImageDimensions};

/// A source image handed in by the upload caller.
///
/// Owned by one pipeline invocation and discarded after processing.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Raw encoded bytes.
    pub data: Vec<u8>,
    /// Declared media type (e.g. "image/jpeg").
    pub media_type: String,
}

/// The watermarked output of one invocation.
///
/// Ownership transfers to the caller, which names and persists it.
/// Dimensions always equal the source image's; the pipeline never
/// resizes the base canvas.
#[derive(Debug, Clone)]
pub struct CompositeResult {
    /// Re-encoded image bytes in the source's own format.
    pub data: Vec<u8>,
    /// Output kind, identical to the source kind.
    pub kind: ImageKind,
    pub width: u32,
    pub height: u32,
}

impl CompositeResult {
    /// Content-Type value for upload metadata.
    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }
}

/// Watermark processor bound to an asset loader and an immutable set of
/// options.
#[derive(Debug, Clone)]
pub struct WatermarkProcessor {
    loader: AssetLoader,
    options: WatermarkOptions,
}

impl WatermarkProcessor {
    /// Create a processor.
    ///
    /// # Errors
    ///
    /// Returns `WatermarkError::Config` if the options fail validation.
    pub fn new(loader: AssetLoader, options: WatermarkOptions) -> Result<Self, WatermarkError> {
        options.validate().map_err(WatermarkError::config)?;
        Ok(Self { loader, options })
    }

    pub fn options(&self) -> &WatermarkOptions {
        &self.options
    }

    /// Run the full pipeline over one source image.
    ///
    /// # Errors
    ///
    /// - `UnsupportedFormat` if the declared media type is not handled
    /// - `Decode` if the source bytes cannot be decoded
    /// - `AssetLoad` if the selected brand mark cannot be loaded;
    ///   the pipeline never returns an unwatermarked result instead
    /// - `Encode` if re-encoding the composed surface fails
    pub async fn process(&self, source: &SourceImage) -> Result<CompositeResult, WatermarkError> {
        let kind = ImageKind::from_media_type(&source.media_type)?;

        let decoded = image::load_from_memory(&source.data)
            .map_err(|e| WatermarkError::decode(e.to_string()))?;
        let mut base: RgbaImage = decoded.to_rgba8();

        let dims = ImageDimensions {
            width: base.width(),
            height: base.height(),
        };

        let transparent = has_transparent_background(&base);
        let (variant, width_pct) = select_variant(transparent, self.options.width_percentage);

        tracing::debug!(
            kind = kind.as_str(),
            width = dims.width,
            height = dims.height,
            transparent,
            variant = variant.as_str(),
            width_pct,
            "Watermarking image"
        );

        let asset = self.loader.load(variant).await?;
        let placement =
            compute_placement(dims, asset.image.width(), asset.image.height(), width_pct);

        let scaled = asset
            .image
            .resize_exact(placement.width, placement.height, FilterType::Lanczos3)
            .to_rgba8();

        composite(&mut base, &scaled, &placement, self.options.opacity);

        let data = super::encoder::encode(&base, kind)?;

        Ok(CompositeResult {
            data,
            kind,
            width: dims.width,
            height: dims.height,
        })
    }
}
