use crate::settings::NetworkSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid setting {name} = {value}: {reason}")]
    InvalidSetting {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Complete application configuration for export/import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version field for future compatibility
    pub version: u32,
    /// All animation settings
    #[serde(default)]
    pub settings: NetworkSettings,
    /// Stats overlay toggle (app-level)
    #[serde(default)]
    pub show_stats: bool,
}

impl AppConfig {
    /// Export config to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Import config from a JSON file, rejecting unusable settings
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load_over(path, &Self::default())
    }

    /// Import a JSON file on top of `base`: keys the file omits keep the
    /// base's values instead of falling back to the defaults
    pub fn load_over(path: &Path, base: &AppConfig) -> Result<Self, ConfigError> {
        let parse_error = |source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        };
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let overlay: Value = serde_json::from_str(&content).map_err(parse_error)?;

        let mut merged = serde_json::to_value(base)?;
        merge_json(&mut merged, overlay);
        let config: AppConfig = serde_json::from_value(merged).map_err(parse_error)?;
        config.settings.validate()?;
        Ok(config)
    }
}

/// Recursively copy `overlay` into `base`; objects merge key by key
fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                merge_json(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, overlay) => *base = overlay,
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            settings: NetworkSettings::default(),
            show_stats: false,
        }
    }
}
