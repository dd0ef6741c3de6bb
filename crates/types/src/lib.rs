//! Shared types for the Stagehand system
//!
//! This crate contains the untyped feature values, the feature store and its
//! coercion rules, and the error types used across the workspace.

pub mod error;
pub mod features;
pub mod utils;
pub mod value;

// Re-export commonly used types
pub use error::{ConfigError, FeatureError, Result, StagehandError};
pub use features::{FeatureStore, Features};
pub use value::FeatureValue;
