//! Application configuration module.
//!
//! Configuration is loaded from a JSON file; when the file is absent the
//! built-in defaults apply.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/app_config.json";

fn default_ocr_language() -> Box<str> {
    "eng".into()
}

/// Application configuration structure.
///
/// String fields use `Box<str>` since they are set once and never modified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Maximum allowed upload size in bytes
    pub max_file_size: u64,

    /// Directory holding uploaded originals and export artifacts
    pub storage_directory: Box<str>,

    /// Host URL for the server
    pub host_url: Box<str>,

    /// Language passed to the OCR engine
    #[serde(default = "default_ocr_language")]
    pub ocr_language: Box<str>,
}

impl AppConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default path (`config/app_config.json`).
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_file(DEFAULT_CONFIG_PATH)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024, // 50 MB
            storage_directory: "tmp".into(),
            host_url: "0.0.0.0:3000".into(),
            ocr_language: default_ocr_language(),
        }
    }
}
