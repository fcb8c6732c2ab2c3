//! Configuration - user preferences from the platform config directory
//!
//! - Linux: ~/.config/photo-gallery/config.toml
//! - macOS: ~/Library/Application Support/photo-gallery/config.toml
//! - Windows: %APPDATA%\photo-gallery\config.toml
//!
//! A missing file means defaults. A broken file is reported and ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::thumbnail::THUMBNAIL_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Gallery configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub gallery: GalleryConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error. `RUST_LOG` wins if set.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Path or http(s) URL of the image manifest
    pub manifest: String,
    /// Thumbnail bounding box in pixels
    pub thumbnail_size: u32,
    /// Render the first image at double size
    pub feature_first: bool,
    /// Gap between tiles in pixels
    pub tile_spacing: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            manifest: "images.json".to_string(),
            thumbnail_size: THUMBNAIL_SIZE,
            feature_first: true,
            tile_spacing: 16.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl Config {
    /// Load config from the default path. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the commented sample config if no config file exists yet
    pub fn ensure_exists() -> Result<(), ConfigError> {
        Self::ensure_exists_at(&Self::default_path())
    }

    /// Write the sample config to `path` unless a file is already there
    pub fn ensure_exists_at(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Ok(());
        }

        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, generate_sample_config()).map_err(write_err)?;

        tracing::info!("Created default config at {}", path.display());
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("photo-gallery")
            .join("config.toml")
    }
}

/// Generate a sample config file with comments
pub fn generate_sample_config() -> String {
    r#"# Photo Gallery Configuration

[general]
# Log level: trace, debug, info, warn, error (RUST_LOG overrides this)
log_level = "info"

[gallery]
# Image manifest: a local path or an http(s) URL
manifest = "images.json"

# Thumbnails fit in a square of this many pixels
thumbnail_size = 256

# Show the first image at double size
feature_first = true

# Gap between tiles in pixels
tile_spacing = 16.0

[window]
width = 1200.0
height = 800.0
"#
    .to_string()
}
