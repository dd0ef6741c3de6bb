//! Descriptor schema definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use types::utils::{render_list, unique_in_order};
use types::{FeatureStore, FeatureValue, Features};

/// Root of a descriptor document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Descriptor name
    #[serde(default)]
    pub name: String,
    /// Environments in document order
    #[serde(default)]
    pub envs: Vec<Env>,
    /// Groups in document order
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Resources in document order
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Configuration-level features, independent of any environment
    #[serde(default)]
    pub features: Features,
}

/// One deployable environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Env {
    /// Environment name
    #[serde(default)]
    pub name: String,
    /// Names of the environments this one depends on
    #[serde(rename = "dependsOn", default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// Environment-level features
    #[serde(default)]
    pub features: Features,
}

/// Named group; any other keys are carried through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, FeatureValue>,
}

/// Named resource; any other keys are carried through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, FeatureValue>,
}

impl Config {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// True if at least one environment declares the feature
    pub fn has_envs_with_feature(&self, name: &str) -> bool {
        self.envs.iter().any(|env| env.has_feature(name))
    }

    /// Environments declaring the feature, in document order
    pub fn envs_with_feature(&self, name: &str) -> Vec<Env> {
        self.envs
            .iter()
            .filter(|env| env.has_feature(name))
            .cloned()
            .collect()
    }

    /// Distinct feature names across all environments.
    ///
    /// Environments are scanned in document order and each environment's
    /// names in ascending order; a name is reported where it is first seen.
    pub fn envs_features(&self) -> Vec<String> {
        unique_in_order(self.envs.iter().flat_map(|env| env.features.names()))
    }

    /// Look up an environment by name
    pub fn env(&self, name: &str) -> Option<&Env> {
        self.envs.iter().find(|env| env.name == name)
    }

    pub fn env_names(&self) -> Vec<&str> {
        self.envs.iter().map(|env| env.name.as_str()).collect()
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|resource| resource.name == name)
    }
}

impl FeatureStore for Config {
    fn features(&self) -> &Features {
        &self.features
    }
}

impl Env {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.depends_on.push(name.into());
        self
    }

    pub fn with_feature(mut self, name: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.features.insert(name, value);
        self
    }

    pub fn has_dependencies(&self) -> bool {
        !self.depends_on.is_empty()
    }

    /// Dependencies rendered as `[dev,test]`
    pub fn render_depends_on(&self) -> String {
        render_list(&self.depends_on)
    }

    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }
}

impl FeatureStore for Env {
    fn features(&self) -> &Features {
        &self.features
    }
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }
}

impl Resource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }
}
