//! Configuration parsing and management.

use crate::expander::{Expander, DEFAULT_MAX_INCLUDE_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use textmacro_types::Markers;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },
}

/// Build configuration matching the textmacro.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Files to expand and concatenate, in order
    #[serde(default)]
    pub inputs: Vec<PathBuf>,

    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Directory inputs are resolved against (defaults to the config's)
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    #[serde(default)]
    pub markers: Markers,

    #[serde(default = "default_max_include_depth")]
    pub max_include_depth: usize,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_max_include_depth() -> usize {
    DEFAULT_MAX_INCLUDE_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: None,
            base_dir: None,
            markers: Markers::default(),
            max_include_depth: default_max_include_depth(),
            config_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("markers.open", &self.markers.open), ("markers.close", &self.markers.close)] {
            if value.is_empty() {
                return Err(ConfigError::InvalidField {
                    field: field.to_string(),
                    reason: "marker must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Directory inputs resolve against: `base_dir` relative to the config
    /// file, else the config file's own directory
    pub fn base_dir(&self) -> Option<PathBuf> {
        match &self.base_dir {
            Some(dir) => Some(self.resolve_path(dir)),
            None => self
                .config_dir()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(Path::to_path_buf),
        }
    }

    /// Output file, resolved relative to the config file
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output.as_ref().map(|p| self.resolve_path(p))
    }

    /// Expander honoring the configured markers and depth limit
    pub fn expander(&self) -> Expander {
        Expander::new()
            .with_markers(self.markers.clone())
            .with_max_depth(self.max_include_depth)
    }

    fn config_dir(&self) -> Option<&Path> {
        self.config_path.as_deref().and_then(Path::parent)
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(parent) = self.config_dir() {
            parent.join(path)
        } else {
            path.to_path_buf()
        }
    }
}
