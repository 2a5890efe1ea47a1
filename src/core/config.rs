//! Editor session configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Error;
use crate::core::types::Result;
use crate::voxel::color::Color;
use crate::voxel::grid::Extent;
use crate::voxel::palette::default_swatches;

/// Configuration handed to [`crate::session::EditorSession`] at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Extent of the grid created by "new model"
    pub default_extent: Extent,
    /// Largest extent accepted from imported files
    pub max_extent: Extent,
    /// Initial palette swatches
    pub palette: Vec<Color>,
    /// Application name shown in the caption
    pub caption: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_extent: Extent::DEFAULT,
            max_extent: Extent::MAX_IMPORT,
            palette: default_swatches(),
            caption: "Zoxel".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the default extent fits the maximum
    pub fn validate(&self) -> Result<()> {
        if !self.default_extent.fits_within(&self.max_extent) {
            return Err(Error::Config(format!(
                "default extent {} exceeds maximum {}",
                self.default_extent, self.max_extent
            )));
        }
        Ok(())
    }

    /// Load from a JSON file (sync)
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }
}
