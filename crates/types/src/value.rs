//! Untyped feature values and their string coercion rules

use crate::error::FeatureError;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed value as it appears under a `features` key
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FeatureValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<FeatureValue>),
    Map(BTreeMap<String, FeatureValue>),
}

impl FeatureValue {
    /// Short name of the value's shape, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            FeatureValue::Null => "null",
            FeatureValue::Bool(_) => "boolean",
            FeatureValue::Int(_) => "integer",
            FeatureValue::Float(_) => "float",
            FeatureValue::String(_) => "string",
            FeatureValue::List(_) => "list",
            FeatureValue::Map(_) => "mapping",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FeatureValue::Null)
    }

    /// True for every shape except lists and mappings
    pub fn is_scalar(&self) -> bool {
        !matches!(self, FeatureValue::List(_) | FeatureValue::Map(_))
    }

    /// Render a scalar value in its canonical string form.
    ///
    /// Null becomes the empty string and floats use the shortest
    /// representation that reads back to the same value. Lists and mappings
    /// are rejected with [`FeatureError::TypeMismatch`].
    pub fn stringify(&self) -> Result<String, FeatureError> {
        match self {
            FeatureValue::Null => Ok(String::new()),
            FeatureValue::Bool(value) => Ok(value.to_string()),
            FeatureValue::Int(value) => Ok(value.to_string()),
            FeatureValue::Float(value) => Ok(value.to_string()),
            FeatureValue::String(value) => Ok(value.clone()),
            FeatureValue::List(_) | FeatureValue::Map(_) => {
                Err(FeatureError::type_mismatch("a scalar", self.kind()))
            }
        }
    }

    /// Render a list value as one string per element.
    ///
    /// Null becomes an empty list. Every element must be a scalar; any other
    /// non-list value is rejected.
    pub fn stringify_list(&self) -> Result<Vec<String>, FeatureError> {
        match self {
            FeatureValue::Null => Ok(Vec::new()),
            FeatureValue::List(items) => items.iter().map(FeatureValue::stringify).collect(),
            other => Err(FeatureError::type_mismatch("a list", other.kind())),
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Bool(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Int(value)
    }
}

impl From<i32> for FeatureValue {
    fn from(value: i32) -> Self {
        FeatureValue::Int(value.into())
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Float(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::String(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::String(value)
    }
}

impl<T: Into<FeatureValue>> From<Vec<T>> for FeatureValue {
    fn from(values: Vec<T>) -> Self {
        FeatureValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, FeatureValue>> for FeatureValue {
    fn from(map: BTreeMap<String, FeatureValue>) -> Self {
        FeatureValue::Map(map)
    }
}

impl<T: Into<FeatureValue>> From<Option<T>> for FeatureValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FeatureValue::Null, Into::into)
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FeatureValue::Null => serializer.serialize_unit(),
            FeatureValue::Bool(value) => serializer.serialize_bool(*value),
            FeatureValue::Int(value) => serializer.serialize_i64(*value),
            FeatureValue::Float(value) => serializer.serialize_f64(*value),
            FeatureValue::String(value) => serializer.serialize_str(value),
            FeatureValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            FeatureValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for FeatureValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FeatureValueVisitor)
    }
}

struct FeatureValueVisitor;

impl<'de> Visitor<'de> for FeatureValueVisitor {
    type Value = FeatureValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a null, boolean, number, string, list or mapping")
    }

    fn visit_unit<E: de::Error>(self) -> Result<FeatureValue, E> {
        Ok(FeatureValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<FeatureValue, E> {
        Ok(FeatureValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<FeatureValue, D::Error> {
        FeatureValue::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<FeatureValue, E> {
        Ok(FeatureValue::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<FeatureValue, E> {
        Ok(FeatureValue::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<FeatureValue, E> {
        i64::try_from(value)
            .map(FeatureValue::Int)
            .map_err(|_| E::custom(format!("integer {} is out of range", value)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<FeatureValue, E> {
        Ok(FeatureValue::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<FeatureValue, E> {
        Ok(FeatureValue::String(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<FeatureValue, E> {
        Ok(FeatureValue::String(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FeatureValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(FeatureValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FeatureValue, A::Error> {
        let mut entries = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, FeatureValue>()? {
            entries.insert(key, value);
        }
        Ok(FeatureValue::Map(entries))
    }
}
