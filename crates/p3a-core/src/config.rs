use crate::error::CoreError;
use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use p3a_interfaces::STAR_ATTRIBUTE_KEYS;

pub use p3a_interfaces::SeparatorPolicy;

/// Base name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "p3a";

/// Default separator between a key and its value in the flattened record.
pub const DEFAULT_KEY_VALUE_SEPARATOR: &str = "|";

/// Default separator between attribute pairs in the flattened record.
pub const DEFAULT_LAYER_SEPARATOR: &str = ";";

// Main configuration structure
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)] // Ensure fields default if missing in config source
pub struct Config {
    pub global: GlobalConfig,
    pub reporting: ReportingConfig,
}

// Global settings
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GlobalConfig {
    pub log_level: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Which record formats a reporter produces. Resolved once at startup and
/// handed to the reporter, never looked up again while reporting.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReportingConfig {
    pub json_enabled: bool,
    pub star_enabled: bool,
    pub star: StarConfig,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            json_enabled: true,
            star_enabled: true,
            star: StarConfig::default(),
        }
    }
}

/// Wire contract of the flattened record. Must match the aggregation service.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StarConfig {
    pub key_value_separator: String,
    pub layer_separator: String,
    pub separator_policy: SeparatorPolicy,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            key_value_separator: DEFAULT_KEY_VALUE_SEPARATOR.to_string(),
            layer_separator: DEFAULT_LAYER_SEPARATOR.to_string(),
            separator_policy: SeparatorPolicy::Permissive,
        }
    }
}

impl StarConfig {
    /// Separators must be non-empty, distinct, and absent from every
    /// attribute key, or records cannot be split back.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.key_value_separator.is_empty() || self.layer_separator.is_empty() {
            return Err(CoreError::InvalidConfig(
                "star separators must not be empty".to_string(),
            ));
        }
        if self.key_value_separator.contains(self.layer_separator.as_str())
            || self.layer_separator.contains(self.key_value_separator.as_str())
        {
            return Err(CoreError::InvalidConfig(format!(
                "star separators must be distinct (key/value '{}', layer '{}')",
                self.key_value_separator, self.layer_separator
            )));
        }
        if let Some(key) = STAR_ATTRIBUTE_KEYS.iter().find(|key| {
            key.contains(self.key_value_separator.as_str())
                || key.contains(self.layer_separator.as_str())
        }) {
            return Err(CoreError::InvalidConfig(format!(
                "attribute key '{}' contains a star separator",
                key
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), CoreError> {
        self.reporting.star.validate()
    }
}

/// Loads configuration from a file and environment variables.
///
/// Uses `source_path` when given (the file must then exist), otherwise looks
/// for an optional `p3a.toml` in the current directory.
/// Overrides with environment variables prefixed with `P3A_`
/// (e.g., `P3A_GLOBAL__LOG_LEVEL=debug`, `P3A_REPORTING__STAR_ENABLED=false`).
/// Note the double underscore `__` for nested fields.
pub fn load_config(source_path: Option<PathBuf>) -> Result<Config, CoreError> {
    let defaults = Config::default();

    let mut builder = ConfigLoader::builder()
        .set_default("global.log_level", defaults.global.log_level)?
        .set_default("reporting.json_enabled", defaults.reporting.json_enabled)?
        .set_default("reporting.star_enabled", defaults.reporting.star_enabled)?
        .set_default(
            "reporting.star.key_value_separator",
            defaults.reporting.star.key_value_separator,
        )?
        .set_default(
            "reporting.star.layer_separator",
            defaults.reporting.star.layer_separator,
        )?
        .set_default("reporting.star.separator_policy", "permissive")?;

    match source_path {
        Some(path) => {
            log::debug!("Loading configuration from: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }
        None => {
            log::debug!(
                "Attempting to load configuration from default locations (e.g., {}.toml)",
                DEFAULT_CONFIG_NAME
            );
            builder = builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("P3A")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let cfg: Config = builder.build()?.try_deserialize()?;
    cfg.validate()?;

    log::debug!("Successfully loaded configuration: {:?}", cfg);
    Ok(cfg)
}
