//! Tool settings assembled from defaults and environment variables

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use types::ConfigError;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// Settings for the `stagehand` tool itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Descriptor file to load
    #[serde(default = "default_config_path")]
    pub config_path: String,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_config_path() -> String {
    "stagehand.yaml".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: default_config_path(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Settings {
    /// Load settings from defaults and `STAGEHAND_` environment variables
    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    /// Defaults overridden by environment, e.g. `STAGEHAND_LOGGING__LEVEL=debug`
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Env::prefixed("STAGEHAND_").split("__"))
    }

    /// Extract and validate settings from an arbitrary figment
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let settings: Settings = figment.extract().context("Failed to parse settings")?;
        settings.validate().context("Invalid settings")?;
        Ok(settings)
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.config_path.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "config_path".to_string(),
                message: "Descriptor path cannot be empty".to_string(),
            });
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logging.level".to_string(),
                message: format!(
                    "Invalid log level: {}. Valid levels: {:?}",
                    self.logging.level, VALID_LOG_LEVELS
                ),
            });
        }

        if !VALID_LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logging.format".to_string(),
                message: format!(
                    "Invalid log format: {}. Valid formats: {:?}",
                    self.logging.format, VALID_LOG_FORMATS
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::{Format, Yaml};

    fn with_overrides(yaml_content: &str) -> Result<Settings> {
        Settings::from_figment(
            Figment::from(Serialized::defaults(Settings::default()))
                .merge(Yaml::string(yaml_content)),
        )
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.config_path, "stagehand.yaml");
        assert_eq!(settings.logging.level, "warn");
        assert_eq!(settings.logging.format, "pretty");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let settings = with_overrides(
            r#"
config_path: envs.yaml
logging:
  level: debug
"#,
        )
        .unwrap();
        assert_eq!(settings.config_path, "envs.yaml");
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, "pretty");
    }

    #[test]
    fn test_validation_errors() {
        assert!(with_overrides("logging:\n  level: loud\n").is_err());
        assert!(with_overrides("logging:\n  format: xml\n").is_err());
        assert!(with_overrides("config_path: ''\n").is_err());
    }
}
