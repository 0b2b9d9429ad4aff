//! Settings for an update run.
//!
//! Values come from, highest priority first: command-line overrides,
//! environment variables, `~/.config/cardlist/settings.toml`, built-in
//! defaults. Every field in the file is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use cardlist_edhrec::OracleConfig;
use cardlist_scryfall::{CatalogConfig, DEFAULT_BULK_DATA_URL};

use crate::error::SettingsError;
use crate::throttle::DEFAULT_REQUEST_DELAY;

pub const DEFAULT_OUTPUT: &str = "formatted_card_list.js";

pub const ENV_OUTPUT: &str = "CARDLIST_OUTPUT";
pub const ENV_CATALOG_FILE: &str = "CARDLIST_CATALOG_FILE";
pub const ENV_ORACLE_URL: &str = "CARDLIST_ORACLE_URL";

/// Card page requests must time out within single-digit seconds.
const MAX_TIMEOUT_SECS: u64 = 9;

/// Contents of `settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: OutputSettings,
    pub catalog: CatalogSettings,
    pub oracle: OracleSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub bulk_data_url: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleSettings {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub request_delay_ms: Option<u64>,
}

/// Canonical path to the settings file: `~/.config/cardlist/settings.toml`.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cardlist").join("settings.toml"))
}

impl Settings {
    /// Load the settings file from its canonical location. A missing file
    /// (or an undeterminable config directory) gives the defaults.
    pub fn load() -> Result<Self, SettingsError> {
        match settings_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&contents)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(contents)?)
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub catalog_file: Option<PathBuf>,
    pub oracle_url: Option<String>,
    pub request_delay_ms: Option<u64>,
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub output: PathBuf,
    pub catalog: CatalogConfig,
    pub oracle: OracleConfig,
    pub request_delay: Duration,
}

impl RunConfig {
    /// Resolve against the process environment.
    pub fn resolve(settings: &Settings, overrides: &Overrides) -> Result<Self, SettingsError> {
        Self::resolve_with_env(settings, overrides, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup.
    pub fn resolve_with_env<E>(
        settings: &Settings,
        overrides: &Overrides,
        env: E,
    ) -> Result<Self, SettingsError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let env_nonempty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let output = overrides
            .output
            .clone()
            .or_else(|| env_nonempty(ENV_OUTPUT).map(PathBuf::from))
            .or_else(|| settings.output.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let catalog = CatalogConfig {
            bulk_data_url: settings
                .catalog
                .bulk_data_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BULK_DATA_URL.to_string()),
            file: overrides
                .catalog_file
                .clone()
                .or_else(|| env_nonempty(ENV_CATALOG_FILE).map(PathBuf::from))
                .or_else(|| settings.catalog.file.clone()),
        };

        let defaults = OracleConfig::default();
        let timeout = match settings.oracle.timeout_secs {
            Some(secs) if secs == 0 || secs > MAX_TIMEOUT_SECS => {
                return Err(SettingsError::invalid(format!(
                    "oracle.timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}, got {secs}"
                )));
            }
            Some(secs) => Duration::from_secs(secs),
            None => defaults.timeout,
        };
        let oracle = OracleConfig {
            base_url: overrides
                .oracle_url
                .clone()
                .or_else(|| env_nonempty(ENV_ORACLE_URL))
                .or_else(|| settings.oracle.base_url.clone())
                .unwrap_or(defaults.base_url),
            timeout,
        };

        let request_delay = overrides
            .request_delay_ms
            .or(settings.oracle.request_delay_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REQUEST_DELAY);
        if request_delay.is_zero() {
            log::warn!("Request delay is zero; card pages will be requested back to back");
        }

        Ok(Self {
            output,
            catalog,
            oracle,
            request_delay,
        })
    }
}
