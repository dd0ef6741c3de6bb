//! Environment descriptor model for the Stagehand system
//!
//! This crate decodes descriptor documents into a tree of environments,
//! groups and resources and answers feature queries over that tree.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::*;
pub use types::{FeatureStore, FeatureValue, Features};
