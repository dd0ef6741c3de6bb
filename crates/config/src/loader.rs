//! Descriptor loader implementation

use crate::schema::{Config, Env, Group, Resource};
use std::path::Path;
use tracing::{debug, info};
use types::ConfigError;

/// Loader that decodes YAML descriptor documents
pub struct ConfigLoader;

impl ConfigLoader {
    /// Decode a descriptor from raw bytes.
    ///
    /// Missing or null `features` keys decode to empty stores, both at the
    /// configuration level and for every environment.
    pub fn load(bytes: &[u8]) -> Result<Config, ConfigError> {
        debug!(size = bytes.len(), "Decoding descriptor");

        let config: Config = serde_yaml::from_slice(bytes).map_err(ConfigError::Decode)?;

        info!(
            name = %config.name,
            envs = config.envs.len(),
            groups = config.groups.len(),
            resources = config.resources.len(),
            "Descriptor loaded"
        );
        Ok(config)
    }

    /// Decode a descriptor from a string (for testing)
    pub fn load_from_str(yaml_content: &str) -> Result<Config, ConfigError> {
        Self::load(yaml_content.as_bytes())
    }

    /// Read and decode a descriptor file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading descriptor");

        let bytes = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;

        Self::load(&bytes)
    }

    /// Encode a descriptor back into YAML
    pub fn to_yaml(config: &Config) -> Result<String, ConfigError> {
        serde_yaml::to_string(config).map_err(ConfigError::Encode)
    }

    /// Starter descriptor with two environments
    pub fn example() -> Config {
        let mut config = Config::new("example");
        config.envs = vec![
            Env::new("dev").with_feature("allow_destroy", true),
            Env::new("prod")
                .with_dependency("dev")
                .with_feature("regions", vec!["us-east-1", "eu-west-1"]),
        ];
        config.groups = vec![Group::new("platform")];
        config.resources = vec![Resource::new("jumpbox")];
        config.features.insert("iaas", "aws");
        config
    }

    /// Write the starter descriptor, refusing to replace an existing file unless `overwrite` is set
    pub fn create_example<P: AsRef<Path>>(path: P, overwrite: bool) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if path.exists() && !overwrite {
            return Err(ConfigError::AlreadyExists {
                path: path.display().to_string(),
            });
        }

        let yaml_content = Self::to_yaml(&Self::example())?;
        std::fs::write(path, yaml_content).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        info!(path = %path.display(), "Example descriptor written");
        Ok(())
    }
}
