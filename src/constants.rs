//! Pipeline-wide constants and defaults.

/// Default watermark blend opacity.
pub const DEFAULT_OPACITY: f32 = 0.4;

/// Default padding option in pixels. Accepted in the options surface
/// but not part of the centered placement math.
pub const DEFAULT_PADDING: u32 = 20;

/// Default watermark width as a percentage of the base image width.
pub const DEFAULT_WIDTH_PERCENTAGE: f32 = 60.0;

/// Width percentage forced when the base image has a transparent
/// background. Overrides any caller-supplied value.
pub const TRANSPARENT_WIDTH_PERCENTAGE: f32 = 80.0;

/// JPEG re-encode quality (the 0.92 quality factor on a 1-100 scale).
pub const JPEG_QUALITY: u8 = 92;

/// Maximum number of decoded watermark assets held in the cache.
/// There are only two variants; the headroom covers config reloads.
pub const ASSET_CACHE_MAX_ENTRIES: u64 = 16;

/// Time-to-live for cached watermark assets, in seconds.
pub const ASSET_CACHE_TTL_SECS: u64 = 3600;

/// Timeout for fetching https:// watermark assets, in seconds.
pub const ASSET_FETCH_TIMEOUT_SECS: u64 = 30;
