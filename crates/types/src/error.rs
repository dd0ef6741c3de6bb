//! Error types for the Stagehand system

use thiserror::Error;

/// Main error type for the Stagehand system
#[derive(Error, Debug)]
pub enum StagehandError {
    /// Descriptor loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Feature resolution errors
    #[error("Feature error: {0}")]
    Feature(String),

    /// Not found errors
    #[error("{kind} not found: {name}")]
    NotFound { kind: String, name: String },

    /// Output serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for Stagehand operations
pub type Result<T> = std::result::Result<T, StagehandError>;

/// Feature value resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    /// The stored value does not have the shape the accessor requires
    #[error("Type mismatch{}: expected {expected}, found {found}", describe_feature(.feature))]
    TypeMismatch {
        feature: Option<String>,
        expected: &'static str,
        found: &'static str,
    },
}

impl FeatureError {
    pub(crate) fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        FeatureError::TypeMismatch {
            feature: None,
            expected,
            found,
        }
    }

    /// Attach the name of the feature being resolved
    pub fn for_feature(self, name: &str) -> Self {
        match self {
            FeatureError::TypeMismatch {
                expected, found, ..
            } => FeatureError::TypeMismatch {
                feature: Some(name.to_string()),
                expected,
                found,
            },
        }
    }
}

fn describe_feature(feature: &Option<String>) -> String {
    match feature {
        Some(name) => format!(" for feature '{}'", name),
        None => String::new(),
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// File could not be read or written
    #[error("Configuration I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Refusing to replace an existing file
    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: String },

    /// Validation error
    #[error("Configuration validation error: {field}: {message}")]
    ValidationError { field: String, message: String },

    /// Malformed or shape-mismatched document
    #[error("Configuration decode error: {0}")]
    Decode(#[source] serde_yaml::Error),

    /// Document could not be encoded
    #[error("Configuration encode error: {0}")]
    Encode(#[source] serde_yaml::Error),
}

impl From<FeatureError> for StagehandError {
    fn from(err: FeatureError) -> Self {
        StagehandError::Feature(err.to_string())
    }
}

impl From<ConfigError> for StagehandError {
    fn from(err: ConfigError) -> Self {
        StagehandError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_message() {
        let err = FeatureError::type_mismatch("a scalar", "mapping");
        assert_eq!(err.to_string(), "Type mismatch: expected a scalar, found mapping");

        let err = err.for_feature("iaas");
        assert_eq!(
            err.to_string(),
            "Type mismatch for feature 'iaas': expected a scalar, found mapping"
        );
    }

    #[test]
    fn test_conversion_to_main_error() {
        let err: StagehandError = FeatureError::type_mismatch("a list", "boolean")
            .for_feature("regions")
            .into();
        assert!(matches!(err, StagehandError::Feature(ref msg) if msg.contains("regions")));

        let err: StagehandError = ConfigError::FileNotFound {
            path: "missing.yaml".to_string(),
        }
        .into();
        assert!(matches!(err, StagehandError::Config(ref msg) if msg.contains("missing.yaml")));
    }
}
