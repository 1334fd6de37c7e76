//! User-facing conversion settings.
//!
//! Handles loading and validating the optional `config.toml`. Settings map
//! one-to-one to the knobs a frontend exposes:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! quality = 75          # JPEG quality (1-100)
//! scale_percent = 50    # Resize percentage (1-100); 50 = half size
//! output_folder = "reduced"  # Subfolder created next to each source file
//! ```
//!
//! Config files are sparse — override just the values you want. A missing
//! file means stock defaults. Unknown keys are rejected to catch typos
//! early.

use crate::imaging::{Quality, Scale};
use crate::reduce::ReduceOptions;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Conversion settings as the user writes them: percentages and plain
/// strings. [`Settings::reduce_options`] converts to the typed parameter
/// set the pipeline consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// JPEG quality, 1-100.
    pub quality: u32,
    /// Resize percentage, 1-100. 50 means "half size".
    pub scale_percent: u32,
    /// Name of the output subfolder created next to each source file.
    pub output_folder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: 75,
            scale_percent: 50,
            output_folder: "reduced".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a `config.toml`. A missing file yields the
    /// defaults; a present-but-invalid file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.quality) {
            return Err(ConfigError::Validation(format!(
                "quality must be 1-100, got {}",
                self.quality
            )));
        }
        if !(1..=100).contains(&self.scale_percent) {
            return Err(ConfigError::Validation(format!(
                "scale_percent must be 1-100, got {}",
                self.scale_percent
            )));
        }

        let folder = Path::new(&self.output_folder);
        if self.output_folder.is_empty() {
            return Err(ConfigError::Validation(
                "output_folder must not be empty".to_string(),
            ));
        }
        if folder.is_absolute() {
            return Err(ConfigError::Validation(format!(
                "output_folder must be a relative name, got {}",
                self.output_folder
            )));
        }
        if folder
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(ConfigError::Validation(format!(
                "output_folder must not contain '..', got {}",
                self.output_folder
            )));
        }
        Ok(())
    }

    /// Convert to the typed parameter set consumed by the pipeline.
    pub fn reduce_options(&self) -> ReduceOptions {
        ReduceOptions {
            scale: Scale::from_percent(self.scale_percent),
            quality: Quality::new(self.quality),
            output_folder: self.output_folder.clone(),
        }
    }
}
