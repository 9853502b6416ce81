//! Brand-mark asset loading with caching.
//!
//! The pipeline uses two immutable, preselected assets: a
//! standard-contrast mark and a light/white-contrast mark. Assets are
//! loaded from a local path or an HTTPS URL, decoded once, and cached
//! process-wide as pre-decoded images. The cache is a safe optimization
//! only; the assets never change at runtime.
//!
//! A fetch or decode failure is an `AssetLoad` error that propagates to
//! the caller. The pipeline deliberately does not fall back to an
//! unwatermarked output.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use image::DynamicImage;
use moka::future::Cache;

use super::error::WatermarkError;
use super::placement::WatermarkVariant;
use crate::constants::{ASSET_CACHE_MAX_ENTRIES, ASSET_CACHE_TTL_SECS, ASSET_FETCH_TIMEOUT_SECS};

/// Parsed source location for a watermark asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Local filesystem path.
    Path(PathBuf),
    /// HTTPS URL.
    Https(String),
}

impl AssetSource {
    /// Parse a source string into an `AssetSource`.
    ///
    /// `https://` URLs fetch over the network; anything else is treated
    /// as a local filesystem path. `http://` is rejected.
    ///
    /// # Errors
    ///
    /// Returns `WatermarkError::Config` for empty or http:// sources.
    pub fn parse(source: &str) -> Result<Self, WatermarkError> {
        if source.is_empty() {
            return Err(WatermarkError::config("asset source cannot be empty"));
        }
        if source.starts_with("http://") {
            return Err(WatermarkError::config(format!(
                "Insecure asset source not allowed: {}. Use https:// or a local path",
                source
            )));
        }
        if source.starts_with("https://") {
            Ok(AssetSource::Https(source.to_string()))
        } else {
            Ok(AssetSource::Path(PathBuf::from(source)))
        }
    }
}

/// The asset source for each watermark variant.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    pub standard: AssetSource,
    pub light: AssetSource,
}

impl AssetCatalog {
    pub fn source_for(&self, variant: WatermarkVariant) -> &AssetSource {
        match variant {
            WatermarkVariant::Standard => &self.standard,
            WatermarkVariant::Light => &self.light,
        }
    }
}

/// A decoded watermark asset.
#[derive(Clone)]
pub struct LoadedAsset {
    /// The decoded image, shared across concurrent pipeline runs.
    pub image: Arc<DynamicImage>,
}

impl std::fmt::Debug for LoadedAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedAsset")
            .field("dimensions", &(self.image.width(), self.image.height()))
            .finish()
    }
}

impl LoadedAsset {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }
}

/// Loader for the two watermark assets with built-in caching.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    catalog: AssetCatalog,
    cache: Cache<WatermarkVariant, LoadedAsset>,
    http_client: reqwest::Client,
}

impl AssetLoader {
    /// Create a new asset loader for the given catalog.
    ///
    /// # Errors
    ///
    /// Returns `WatermarkError::Config` if the HTTP client cannot be
    /// created (e.g. TLS configuration issues).
    pub fn new(catalog: AssetCatalog) -> Result<Self, WatermarkError> {
        let cache = Cache::builder()
            .max_capacity(ASSET_CACHE_MAX_ENTRIES)
            .time_to_live(Duration::from_secs(ASSET_CACHE_TTL_SECS))
            .build();

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(ASSET_FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                WatermarkError::config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            catalog,
            cache,
            http_client,
        })
    }

    /// Load the asset for a variant, decoding on first use and caching
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns `WatermarkError::AssetLoad` if the asset cannot be read,
    /// fetched, or decoded.
    pub async fn load(&self, variant: WatermarkVariant) -> Result<LoadedAsset, WatermarkError> {
        if let Some(cached) = self.cache.get(&variant).await {
            return Ok(cached);
        }

        let source = self.catalog.source_for(variant);
        let bytes = match source {
            AssetSource::Path(path) => tokio::fs::read(path).await.map_err(|e| {
                WatermarkError::asset_load(format!(
                    "{} asset at {}: {}",
                    variant.as_str(),
                    path.display(),
                    e
                ))
            })?,
            AssetSource::Https(url) => self.fetch_https(url, variant).await?,
        };

        let image = image::load_from_memory(&bytes).map_err(|e| {
            WatermarkError::asset_load(format!("decoding {} asset: {}", variant.as_str(), e))
        })?;

        let asset = LoadedAsset::new(image);
        self.cache.insert(variant, asset.clone()).await;

        tracing::debug!(
            variant = variant.as_str(),
            width = asset.image.width(),
            height = asset.image.height(),
            "Watermark asset loaded"
        );

        Ok(asset)
    }

    async fn fetch_https(
        &self,
        url: &str,
        variant: WatermarkVariant,
    ) -> Result<Vec<u8>, WatermarkError> {
        let response = self.http_client.get(url).send().await.map_err(|e| {
            WatermarkError::asset_load(format!("fetching {} asset: {}", variant.as_str(), e))
        })?;

        if !response.status().is_success() {
            return Err(WatermarkError::asset_load(format!(
                "fetching {} asset from {}: HTTP {}",
                variant.as_str(),
                url,
                response.status()
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            WatermarkError::asset_load(format!("reading {} asset body: {}", variant.as_str(), e))
        })?;

        Ok(bytes.to_vec())
    }
}
