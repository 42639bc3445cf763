/// Review settings
///
/// Read from `settings.json` in the user's config directory:
/// - Linux: ~/.config/image-review/settings.json
/// - macOS: ~/Library/Application Support/image-review/settings.json
/// - Windows: %APPDATA%\image-review\settings.json
///
/// The file is only ever read. A missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SettingsError;
use crate::manifest::{ManifestOrder, DEFAULT_FILE_NAME};

/// Placeholder shown when an image cannot be displayed, relative to the asset directory
const DEFAULT_FALLBACK_NAME: &str = "bg2.png";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReviewSettings {
    /// Directory loaded at startup (None = wait for Open Folder)
    pub asset_dir: Option<PathBuf>,

    /// File extensions to load, compared case-insensitively
    pub extensions: Vec<String>,

    /// Image shown in place of a broken one
    /// None = `bg2.png` inside the asset directory
    pub fallback_image: Option<PathBuf>,

    /// Name offered by the save dialog
    pub manifest_file_name: String,

    pub manifest_order: ManifestOrder,

    /// Group number to open first, e.g. "2" (None = lowest group)
    pub start_group: Option<String>,

    // ========== Layout ==========
    pub card_width: f32,
    pub card_height: f32,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            asset_dir: None,
            extensions: vec!["png".to_string()],
            fallback_image: None,
            manifest_file_name: DEFAULT_FILE_NAME.to_string(),
            manifest_order: ManifestOrder::Discovery,
            start_group: None,
            card_width: 460.0,
            card_height: 360.0,
        }
    }
}

impl ReviewSettings {
    /// Where the settings file lives, if a config directory exists
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("image-review");
        path.push("settings.json");
        Some(path)
    }

    /// Load settings from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        Self::from_json(&json).map_err(|e| SettingsError::Json {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Fallback image for a given asset directory
    pub fn fallback_for(&self, asset_dir: &Path) -> PathBuf {
        self.fallback_image
            .clone()
            .unwrap_or_else(|| asset_dir.join(DEFAULT_FALLBACK_NAME))
    }
}
