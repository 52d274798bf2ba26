//! Application configuration.
//!
//! Loaded once at startup from a YAML file and immutable thereafter. The
//! four API keys are required and must be non-empty; a missing key is a
//! fatal configuration error whose message names the key. The input-device
//! and dry-run keys are optional with defaults.
//!
//! ```yaml
//! host: https://api.tessie.com
//! vin: 5YJ3000000NEXUS01
//! access_token: abc123
//! climate_duration_seconds: 600
//! # optional:
//! device_id: usb-5131_2019-event-kbd
//! dry_run: false
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_yaml::Value;
use thiserror::Error;

/// Default stable device ID under `/dev/input/by-id`.
pub const DEFAULT_DEVICE_ID: &str = "usb-5131_2019-event-kbd";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file was not valid YAML.
    #[error("failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A required key was absent.
    #[error("did not find {key} in config file")]
    MissingKey {
        /// Name of the missing key.
        key: &'static str,
    },

    /// A key was present but unusable.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// Name of the offending key.
        key: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

/// Complete application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the vehicle API.
    pub host: String,
    /// Vehicle identifier.
    pub vin: String,
    /// Bearer credential for the vehicle API.
    pub access_token: String,
    /// How long climate stays on before the shutoff decision check.
    pub climate_duration_seconds: u64,
    /// Stable input-device ID under `/dev/input/by-id`.
    pub device_id: String,
    /// Use the mock vehicle client instead of the network.
    pub dry_run: bool,
}

impl Config {
    /// Load and validate configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse and validate configuration from YAML text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let doc: Value = serde_yaml::from_str(text)?;

        Ok(Self {
            host: require_string(&doc, "host")?,
            vin: require_string(&doc, "vin")?,
            access_token: require_string(&doc, "access_token")?,
            climate_duration_seconds: require_seconds(&doc, "climate_duration_seconds")?,
            device_id: optional_string(&doc, "device_id")?
                .unwrap_or_else(|| DEFAULT_DEVICE_ID.to_string()),
            dry_run: optional_bool(&doc, "dry_run")?.unwrap_or(false),
        })
    }

    /// The climate wait as a [`Duration`].
    pub fn climate_wait(&self) -> Duration {
        Duration::from_secs(self.climate_duration_seconds)
    }
}

fn require_string(doc: &Value, key: &'static str) -> Result<String, ConfigError> {
    let value = doc.get(key).ok_or(ConfigError::MissingKey { key })?;
    let text = value.as_str().ok_or_else(|| ConfigError::InvalidValue {
        key,
        reason: "expected a string".to_string(),
    })?;
    if text.is_empty() {
        return Err(ConfigError::InvalidValue {
            key,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(text.to_string())
}

fn require_seconds(doc: &Value, key: &'static str) -> Result<u64, ConfigError> {
    let value = doc.get(key).ok_or(ConfigError::MissingKey { key })?;
    value.as_u64().ok_or_else(|| ConfigError::InvalidValue {
        key,
        reason: "expected a non-negative integer".to_string(),
    })
}

fn optional_string(doc: &Value, key: &'static str) -> Result<Option<String>, ConfigError> {
    match doc.get(key) {
        None => Ok(None),
        Some(value) => {
            let text = value.as_str().ok_or_else(|| ConfigError::InvalidValue {
                key,
                reason: "expected a string".to_string(),
            })?;
            Ok(Some(text.to_string()))
        }
    }
}

fn optional_bool(doc: &Value, key: &'static str) -> Result<Option<bool>, ConfigError> {
    match doc.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| ConfigError::InvalidValue {
                key,
                reason: "expected a boolean".to_string(),
            }),
    }
}
