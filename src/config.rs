//! Session configuration
//!
//! Every setting has a default matching the behavior players expect, so an
//! empty YAML document is a valid configuration.
//!
//! ```rust
//! use splitframe::Config;
//!
//! let config = Config::from_yaml_str("sampler:\n  capacity: 30\n").unwrap();
//! assert_eq!(config.sampler.capacity, 30);
//! assert_eq!(config.sampler.default_fps, 60);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::{Result, RetimeError};

/// Tunables for frame sampling and fps estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Samples needed before the estimate is final
    pub capacity: usize,

    /// Estimate reported while no samples are available
    pub default_fps: u32,

    /// Relative deviation from the running average at which a sample is an outlier
    pub outlier_tolerance: f64,

    /// Windows smaller than this are cleared on any rejection
    pub reset_threshold: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self { capacity: 60, default_fps: 60, outlier_tolerance: 0.2, reset_threshold: 5 }
    }
}

impl SamplerConfig {
    /// Check that the settings describe a usable sampler
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(RetimeError::config("sampler.capacity", "must be at least 1"));
        }
        if self.default_fps == 0 {
            return Err(RetimeError::config("sampler.default_fps", "must be at least 1"));
        }
        if !(self.outlier_tolerance > 0.0 && self.outlier_tolerance < 1.0) {
            return Err(RetimeError::config(
                "sampler.outlier_tolerance",
                format!("must be within (0, 1), got {}", self.outlier_tolerance),
            ));
        }
        if self.reset_threshold > self.capacity {
            return Err(RetimeError::config(
                "sampler.reset_threshold",
                format!(
                    "must not exceed capacity ({} > {})",
                    self.reset_threshold, self.capacity
                ),
            ));
        }
        Ok(())
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "splitframe=info".to_string() }
    }
}

impl LoggingConfig {
    /// Parse the configured filter
    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.filter)
            .map_err(|e| RetimeError::config("logging.filter", e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.env_filter().map(|_| ())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sampler: SamplerConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml_ng::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| RetimeError::file_error(path.to_path_buf(), e))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<()> {
        self.sampler.validate()?;
        self.logging.validate()
    }
}

/// Install a global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over the configured filter. Returns an error
/// if the filter does not parse; a subscriber that is already installed is
/// left in place.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => config.env_filter()?,
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    Ok(())
}
