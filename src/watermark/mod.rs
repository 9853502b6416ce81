//! Watermark pipeline for listing photos.
//!
//! Applies a translucent brand mark to uploaded images before they are
//! persisted to object storage. The pipeline samples a fixed set of
//! pixel positions to classify background transparency, picks the
//! matching mark variant, scales it to a bounded fraction of the base
//! width, composites it centered, and re-encodes to the source's own
//! format.
//!
//! # Pipeline stages
//!
//! `decode -> classify -> select -> load asset -> scale -> composite -> encode`
//!
//! Every stage failure maps to an explicit error: `Decode` for corrupt
//! sources, `AssetLoad` for mark fetch/decode failures, `Encode` for
//! re-encode failures. An asset failure is never silently skipped; an
//! unwatermarked upload would violate the feature's purpose.
//!
//! # Concurrency
//!
//! Invocations share nothing mutable. The only shared resource is the
//! read-only asset cache, which is safe to reuse across concurrent
//! uploads.

pub mod assets;
pub mod classifier;
pub mod compositor;
pub mod config;
pub mod encoder;
pub mod error;
pub mod format;
pub mod placement;
pub mod processor;

// Re-export main types for convenience
pub use assets::{AssetCatalog, AssetLoader, AssetSource, LoadedAsset};
pub use classifier::has_transparent_background;
pub use compositor::composite;
pub use config::WatermarkOptions;
pub use error::WatermarkError;
pub use format::ImageKind;
pub use placement::{
    compute_placement, select_variant, ImageDimensions, ScaledPlacement, WatermarkVariant,
};
pub use processor::{CompositeResult, SourceImage, WatermarkProcessor};
