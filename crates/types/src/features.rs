//! Named feature flags and the accessors shared by every type that carries them

use crate::error::FeatureError;
use crate::value::FeatureValue;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Mapping from feature name to its untyped value
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Features(BTreeMap<String, FeatureValue>);

impl Features {
    /// Create an empty feature store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Raw value stored under `name`
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.0.get(name)
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FeatureValue>,
    ) -> Option<FeatureValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Feature names in ascending order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FeatureValue> {
        self.0.iter()
    }
}

// An explicit `features: ~` decodes to an empty store.
impl<'de> Deserialize<'de> for Features {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Option::<BTreeMap<String, FeatureValue>>::deserialize(deserializer)?;
        Ok(Self(map.unwrap_or_default()))
    }
}

impl From<BTreeMap<String, FeatureValue>> for Features {
    fn from(map: BTreeMap<String, FeatureValue>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<FeatureValue>> FromIterator<(K, V)> for Features {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Features {
    type Item = (&'a String, &'a FeatureValue);
    type IntoIter = btree_map::Iter<'a, String, FeatureValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Typed read access to a feature store.
///
/// Implementors only expose their [`Features`]; lookups and coercion are
/// shared. Absent features are never an error: they resolve to `""` or an
/// empty list. A value of the wrong shape yields
/// [`FeatureError::TypeMismatch`] naming the feature.
pub trait FeatureStore {
    fn features(&self) -> &Features;

    fn has_feature(&self, name: &str) -> bool {
        self.features().contains(name)
    }

    /// Resolve a single-valued feature
    fn feature(&self, name: &str) -> Result<String, FeatureError> {
        match self.features().get(name) {
            Some(value) => value.stringify().map_err(|e| e.for_feature(name)),
            None => Ok(String::new()),
        }
    }

    /// Resolve a list-valued feature
    fn feature_list(&self, name: &str) -> Result<Vec<String>, FeatureError> {
        match self.features().get(name) {
            Some(value) => value.stringify_list().map_err(|e| e.for_feature(name)),
            None => Ok(Vec::new()),
        }
    }
}

impl FeatureStore for Features {
    fn features(&self) -> &Features {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(name: &str, value: impl Into<FeatureValue>) -> Features {
        let mut features = Features::new();
        features.insert(name, value);
        features
    }

    #[test]
    fn test_empty_store_never_fails() {
        let features = Features::default();
        for name in ["testFeature", "", "iaas"] {
            assert!(!features.has_feature(name));
            assert_eq!(features.feature(name).unwrap(), "");
            assert!(features.feature_list(name).unwrap().is_empty());
        }
    }

    #[test]
    fn test_has_feature() {
        let features = store("iaas", "aws");
        assert!(features.has_feature("iaas"));
        assert!(!features.has_feature("nonexistent"));

        // present with a null value still counts
        let features = store("flag", FeatureValue::Null);
        assert!(features.has_feature("flag"));
    }

    #[test]
    fn test_feature_resolution() {
        assert_eq!(store("f", "string").feature("f").unwrap(), "string");
        assert_eq!(store("f", true).feature("f").unwrap(), "true");
        assert_eq!(store("f", 2.4).feature("f").unwrap(), "2.4");
        assert_eq!(store("f", 42).feature("f").unwrap(), "42");
        assert_eq!(store("f", FeatureValue::Null).feature("f").unwrap(), "");
        assert_eq!(store("f", "x").feature("other").unwrap(), "");
    }

    #[test]
    fn test_feature_type_mismatch_names_feature() {
        let features = store("testFeature", vec!["stuff", "more stuff"]);
        let err = features.feature("testFeature").unwrap_err();
        assert_eq!(
            err,
            FeatureError::TypeMismatch {
                feature: Some("testFeature".to_string()),
                expected: "a scalar",
                found: "list",
            }
        );
    }

    #[test]
    fn test_feature_list_resolution() {
        assert_eq!(store("f", vec!["string"]).feature_list("f").unwrap(), vec!["string"]);
        assert_eq!(store("f", vec![true]).feature_list("f").unwrap(), vec!["true"]);
        assert_eq!(store("f", vec![42]).feature_list("f").unwrap(), vec!["42"]);
        assert!(store("f", FeatureValue::Null).feature_list("f").unwrap().is_empty());
        assert!(store("f", vec!["x"]).feature_list("other").unwrap().is_empty());

        assert!(store("f", true).feature_list("f").is_err());
        let nested = FeatureValue::List(vec![FeatureValue::from(vec!["a", "b"])]);
        assert!(store("f", nested).feature_list("f").is_err());
    }

    #[test]
    fn test_deserialize_null_as_empty() {
        let features: Features = serde_yaml::from_str("~").unwrap();
        assert!(features.is_empty());

        let features: Features = serde_yaml::from_str("iaas: aws\nregions: [a, b]").unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features.names().collect::<Vec<_>>(), vec!["iaas", "regions"]);
    }

    #[test]
    fn test_from_iterator() {
        let features: Features = [("b", 1), ("a", 2)].into_iter().collect();
        assert_eq!(features.get("a"), Some(&FeatureValue::Int(2)));
        assert_eq!(features.iter().count(), 2);
    }
}
