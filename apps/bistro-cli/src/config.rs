//! # CLI Configuration
//!
//! Where the menu lives, how payments settle, how money is printed.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BISTRO_MENU_PATH=./data/menu.json                                  │
//! │     BISTRO_PAYMENT_SUCCESS_RATE=0.9                                    │
//! │     BISTRO_PAYMENT_SEED=42                                             │
//! │     BISTRO_CURRENCY_SYMBOL=€                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $BISTRO_CONFIG, or ./bistro.toml when present                      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     data/menu.json, 90% success, unseeded, "$"                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # bistro.toml
//! menu_path = "data/menu.json"
//! currency_symbol = "$"
//!
//! [payment]
//! success_rate = 0.9
//! seed = 42        # omit for a non-reproducible generator
//! ```

use std::path::{Path, PathBuf};

use bistro_core::payment::DEFAULT_SUCCESS_RATE;
use bistro_store::DEFAULT_MENU_PATH;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "bistro.toml";

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

// =============================================================================
// Payment Settings
// =============================================================================

/// How simulated payments settle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSettings {
    /// Probability that a settlement succeeds, in `[0, 1]`.
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,

    /// Seed for reproducible outcomes.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_success_rate() -> f64 {
    DEFAULT_SUCCESS_RATE
}

impl Default for PaymentSettings {
    fn default() -> Self {
        PaymentSettings {
            success_rate: default_success_rate(),
            seed: None,
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Menu snapshot file.
    #[serde(default = "default_menu_path")]
    pub menu_path: PathBuf,

    /// Symbol printed in front of amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default)]
    pub payment: PaymentSettings,
}

fn default_menu_path() -> PathBuf {
    PathBuf::from(DEFAULT_MENU_PATH)
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            menu_path: default_menu_path(),
            currency_symbol: default_currency_symbol(),
            payment: PaymentSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`$BISTRO_CONFIG` or `./bistro.toml`)
    /// 3. Environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let env = |key: &str| std::env::var(key).ok();

        let explicit = env("BISTRO_CONFIG").map(PathBuf::from);
        let path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if explicit.is_some() || path.exists() {
            Self::from_file(&path)?
        } else {
            debug!(?path, "Config file not found, using defaults");
            Self::default()
        };

        config.apply_overrides(env)?;
        config.validate()?;

        Ok(config)
    }

    /// Reads a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `BISTRO_*` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("BISTRO_MENU_PATH") {
            debug!(path = %path, "Overriding menu path from environment");
            self.menu_path = PathBuf::from(path);
        }

        if let Some(rate) = lookup("BISTRO_PAYMENT_SUCCESS_RATE") {
            self.payment.success_rate = rate
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BISTRO_PAYMENT_SUCCESS_RATE".to_string()))?;
        }

        if let Some(seed) = lookup("BISTRO_PAYMENT_SEED") {
            self.payment.seed = Some(
                seed.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("BISTRO_PAYMENT_SEED".to_string()))?,
            );
        }

        if let Some(symbol) = lookup("BISTRO_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.payment.success_rate) {
            return Err(ConfigError::InvalidValue("payment.success_rate".to_string()));
        }

        if self.menu_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("menu_path".to_string()));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
