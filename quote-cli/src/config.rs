//! `quote.toml` settings.
//!
//! ```toml
//! [pricing]
//! tax_rate = "0.05"
//! minimum_charge = 200
//!
//! [logging]
//! level = "info"
//! file = "quote.log"
//!
//! [[presets]]
//! group = "banner"
//! name = "Shop banner"
//! length = 300
//! width = 90
//! ```
//!
//! Every section and field is optional; missing values keep their defaults.

use std::path::{Path, PathBuf};

use quote_core::{PricingConfig, PricingConfigError};
use quote_data::SizePreset;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid pricing settings: {0}")]
    Invalid(#[from] PricingConfigError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive, e.g. `"debug"` or `"info,quote_core=trace"`.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pricing: PricingConfig,
    pub logging: LoggingConfig,
    pub presets: Vec<SizePreset>,
}

impl AppConfig {
    /// Parses and validates a config document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(input)?;
        config.pricing.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), presets = config.presets.len(), "config loaded");
        Ok(config)
    }
}
