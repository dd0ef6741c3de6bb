//! Command implementations; each returns the text to print

use config::{Config, ConfigLoader, Env, FeatureStore};
use std::path::Path;
use tracing::debug;
use types::utils::render_list;
use types::{Result, StagehandError};

/// Human-readable summary of a descriptor
pub fn show(config: &Config) -> Result<String> {
    let mut lines = vec![format!("name: {}", config.name)];

    lines.push("envs:".to_string());
    for env in &config.envs {
        lines.push(format!("  {}", describe_env(env)));
    }

    lines.push(format!(
        "groups: {}",
        render_list(config.groups.iter().map(|group| group.name.as_str()))
    ));
    lines.push(format!(
        "resources: {}",
        render_list(config.resources.iter().map(|resource| resource.name.as_str()))
    ));

    lines.push("features:".to_string());
    for (name, value) in &config.features {
        let rendered = match (value.stringify(), value.stringify_list()) {
            (Ok(scalar), _) => scalar,
            (_, Ok(items)) => render_list(items),
            _ => format!("<{}>", value.kind()),
        };
        lines.push(format!("  {}: {}", name, rendered));
    }

    Ok(lines.join("\n"))
}

/// Full descriptor as pretty-printed JSON
pub fn show_json(config: &Config) -> Result<String> {
    serde_json::to_string_pretty(config)
        .map_err(|e| StagehandError::Serialization(e.to_string()))
}

/// One line per environment, optionally only those declaring a feature
pub fn envs(config: &Config, with_feature: Option<&str>) -> Result<String> {
    let selected = match with_feature {
        Some(name) => config.envs_with_feature(name),
        None => config.envs.clone(),
    };
    debug!(count = selected.len(), "Listing environments");

    Ok(selected
        .iter()
        .map(describe_env)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Distinct feature names declared across all environments
pub fn features(config: &Config) -> Result<String> {
    Ok(config.envs_features().join("\n"))
}

/// Resolve a feature at configuration level or for one environment
pub fn feature(config: &Config, name: &str, env: Option<&str>, list: bool) -> Result<String> {
    let store: &dyn FeatureStore = match env {
        Some(env_name) => config
            .env(env_name)
            .ok_or_else(|| StagehandError::NotFound {
                kind: "Environment".to_string(),
                name: env_name.to_string(),
            })?,
        None => config,
    };

    if list {
        Ok(store.feature_list(name)?.join("\n"))
    } else {
        Ok(store.feature(name)?)
    }
}

/// Write the example descriptor
pub fn init(path: &Path, force: bool) -> Result<String> {
    ConfigLoader::create_example(path, force)?;
    Ok(format!("Wrote example descriptor to {}", path.display()))
}

fn describe_env(env: &Env) -> String {
    if env.has_dependencies() {
        format!("{} {}", env.name, env.render_depends_on())
    } else {
        env.name.clone()
    }
}
