// Configuration module

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::watermark::{AssetCatalog, AssetSource, WatermarkOptions};

fn default_enabled() -> bool {
    true
}

/// Application configuration loaded from YAML.
///
/// ```yaml
/// assets:
///   standard: "assets/brandmark.png"
///   light: "https://cdn.example.com/brandmark-light.png"
/// watermark:
///   opacity: 0.4
///   width_percentage: 60
/// enabled: true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub assets: AssetsConfig,

    /// Watermark options; all fields optional with spec defaults.
    #[serde(default)]
    pub watermark: WatermarkOptions,

    /// Caller-owned switch. When false the pipeline is bypassed and
    /// sources pass through unmodified.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// Sources for the two brand-mark variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Standard-contrast mark (local path or https:// URL).
    pub standard: String,
    /// Light/white-contrast mark for transparent backgrounds.
    pub light: String,
}

impl Config {
    /// Load and validate configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        let config: Config = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        AssetSource::parse(&self.assets.standard)
            .map_err(|e| format!("assets.standard: {}", e))?;
        AssetSource::parse(&self.assets.light).map_err(|e| format!("assets.light: {}", e))?;
        self.watermark
            .validate()
            .map_err(|e| format!("watermark: {}", e))?;
        Ok(())
    }

    /// Build the asset catalog from the configured sources.
    ///
    /// Call after `validate()`; sources are parsed again here.
    pub fn asset_catalog(&self) -> Result<AssetCatalog, String> {
        Ok(AssetCatalog {
            standard: AssetSource::parse(&self.assets.standard).map_err(|e| e.to_string())?,
            light: AssetSource::parse(&self.assets.light).map_err(|e| e.to_string())?,
        })
    }
}
