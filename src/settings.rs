//! Persisted surface settings.
//!
//! Settings live as pretty-printed JSON under the platform config directory.
//! Every field has a default, so a partial (or missing) file still loads and
//! the defaults reproduce the fixed drawing parameters exactly.

use crate::constants::{DEFAULT_LABEL, DEFAULT_LOG_FILTER, SURFACE_HEIGHT};
use crate::error::SignatureResult;
use crate::types::StrokeStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "signature-surface";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureSettings {
    /// Fixed surface height in logical units
    pub surface_height: u32,
    pub stroke: StrokeStyle,
    /// Label used when the host supplies none
    pub default_label: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for SignatureSettings {
    fn default() -> Self {
        Self {
            surface_height: SURFACE_HEIGHT,
            stroke: StrokeStyle::default(),
            default_label: DEFAULT_LABEL.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl SignatureSettings {
    /// Load from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to load settings from {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> SignatureResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> SignatureResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// `<config dir>/signature-surface/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}
