//! Store configuration
//!
//! The only setting the store needs is where its data directory lives.
//! Resolution order:
//!
//! 1. an explicit override (CLI flag or `TAPSTORE_DATA`),
//! 2. `data_dir` in the platform config file (`config.toml`),
//! 3. the platform data directory for `tapstore`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("No home directory available to derive a data directory")]
    NoHome,
}

/// On-disk configuration file contents.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    /// Data directory holding the table files.
    pub data_dir: Option<PathBuf>,
}

impl ConfigFile {
    fn parse(raw: &str) -> Result<Self> {
        toml::from_str(raw)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Invalid config.toml")
    }
}

/// Resolved store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Uses an explicit data directory, bypassing file and platform lookups.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolves the configuration, preferring `override_dir` when given.
    pub fn resolve(override_dir: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = override_dir {
            return Ok(Self::with_data_dir(dir));
        }

        let dirs = ProjectDirs::from("", "", "tapstore").ok_or(ConfigError::NoHome)?;

        let config_path = dirs.config_dir().join("config.toml");
        if config_path.is_file() {
            let raw = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            if let Some(dir) = ConfigFile::parse(&raw)?.data_dir {
                return Ok(Self::with_data_dir(dir));
            }
        }

        Ok(Self::with_data_dir(dirs.data_dir()))
    }
}
