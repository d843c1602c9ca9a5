//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! daylight-config.toml file. It provides default file locations for the
//! dataset and packed year, the log level, and the synthetic-year model.

use crate::simulate::SimulationParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "daylight-config.toml";

/// Application configuration loaded from daylight-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// File locations
    pub data: DataConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Synthetic year model
    #[serde(default)]
    pub simulation: SimulationParams,
}

/// Where datasets and packed years live
#[derive(Debug, Deserialize, Serialize)]
pub struct DataConfig {
    /// JSON list of daily sunrise/sunset records
    pub dataset_path: PathBuf,
    /// 640-byte packed year file
    pub packed_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Max level: "error", "warn", "info", "debug" or "trace".
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                dataset_path: PathBuf::from("sun-times.json"),
                packed_path: PathBuf::from("daylight.bin"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            simulation: SimulationParams::default(),
        }
    }
}

impl Config {
    /// Load configuration from daylight-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Invalid config file format in {}: {}", path.display(), e);
                    warn!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                info!("No config file at {}, using default configuration", path.display());
                Self::default()
            }
        }
    }

    /// Save current configuration to `path`
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }
}
