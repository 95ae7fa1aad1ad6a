//! YAML configuration file support.
//!
//! Loads the sketch parameters (and the log filter used by the demo binary)
//! from a single YAML document.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "recipe-catalog"
//! log_filter: "recipefp=info,sketch=debug"
//!
//! sketch:
//!   version: 1
//!   buckets: 256
//!   format: "wide"
//!   max_bucket_delta: 16
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sketch::{HashFormat, SketchConfig};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RecipeFpConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// `tracing-subscriber` env-filter directive for the binary
    #[serde(default)]
    pub log_filter: Option<String>,

    /// Sketch pipeline configuration
    #[serde(default)]
    pub sketch: SketchYamlConfig,
}

impl RecipeFpConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: RecipeFpConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;
        self.sketch.validate()
    }

    /// Sketch configuration for the pipeline entry points.
    pub fn sketch_config(&self) -> SketchConfig {
        self.sketch.to_sketch_config()
    }
}

impl Default for RecipeFpConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            log_filter: None,
            sketch: SketchYamlConfig::default(),
        }
    }
}

/// Sketch stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_buckets")]
    pub buckets: usize,

    #[serde(default)]
    pub format: HashFormat,

    #[serde(default = "default_max_bucket_delta")]
    pub max_bucket_delta: u32,
}

impl SketchYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_sketch_config()
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("sketch: {e}")))
    }

    pub fn to_sketch_config(&self) -> SketchConfig {
        SketchConfig {
            version: self.version,
            buckets: self.buckets,
            format: self.format,
            max_bucket_delta: self.max_bucket_delta,
        }
    }
}

impl Default for SketchYamlConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            buckets: default_buckets(),
            format: HashFormat::default(),
            max_bucket_delta: default_max_bucket_delta(),
        }
    }
}

// Helper functions for serde defaults
fn default_version() -> u32 {
    1
}
fn default_buckets() -> usize {
    256
}
fn default_max_bucket_delta() -> u32 {
    16
}
