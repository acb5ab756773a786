//! Player configuration.
//!
//! Settings come from a TOML file on native hosts or from a JS object in the
//! browser; both deserialize into [`PlayerConfig`]. Every field is optional.
//!
//! ```toml
//! autoplay_interval_ms = 1500
//! start_message = "Press play to begin."
//! default_variation = "evans-gambit"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Timing and wording of the variation boards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Delay between autoplay steps. Defaults to 2000 ms.
    pub autoplay_interval_ms: u64,
    /// Delay before the extra resize of a newly created board. Defaults to
    /// 200 ms.
    pub initial_resize_delay_ms: u64,
    /// Annotation shown at the starting position.
    pub start_message: String,
    /// Annotation shown for a ply the variation does not annotate.
    pub missing_annotation_message: String,
    /// Variation selected at startup when the page does not preselect one.
    pub default_variation: Option<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: 2000,
            initial_resize_delay_ms: 200,
            start_message: "Start of the game.".to_string(),
            missing_annotation_message: "No annotation available for this move.".to_string(),
            default_variation: None,
        }
    }
}

impl PlayerConfig {
    /// Parses configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] if the text is not valid TOML or a
    /// field has the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a TOML file.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be
    /// read, or [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the autoplay step interval.
    #[must_use]
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    /// Returns the delay before a new board's extra resize.
    #[must_use]
    pub fn initial_resize_delay(&self) -> Duration {
        Duration::from_millis(self.initial_resize_delay_ms)
    }
}
