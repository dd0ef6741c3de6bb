//! Stagehand - command-line entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::ConfigLoader;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod settings;

use settings::{LoggingConfig, Settings};

/// Query environments and features of an infrastructure descriptor
#[derive(Debug, Parser)]
#[command(name = "stagehand", version, about)]
struct Cli {
    /// Descriptor file (overrides STAGEHAND_CONFIG_PATH)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarize the descriptor
    Show {
        /// Print the whole model as JSON
        #[arg(long)]
        json: bool,
    },
    /// List environments and their dependencies
    Envs {
        /// Only environments declaring this feature
        #[arg(long)]
        with_feature: Option<String>,
    },
    /// List feature names declared across all environments
    Features,
    /// Resolve a single feature
    Feature {
        name: String,
        /// Resolve for this environment instead of the descriptor
        #[arg(long)]
        env: Option<String>,
        /// Treat the feature as a list, one item per line
        #[arg(long)]
        list: bool,
    },
    /// Write an example descriptor
    Init {
        path: PathBuf,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env file if it exists
    let dotenv_result = dotenv::dotenv();

    let settings = Settings::load().context("Failed to load settings")?;
    init_logging(&settings.logging)?;

    if let Err(e) = dotenv_result {
        if !e.to_string().contains("No such file or directory") {
            warn!("Could not load .env file: {}", e);
        }
    }

    debug!("Starting Stagehand v{}", env!("CARGO_PKG_VERSION"));

    let output = match cli.command {
        Command::Init { path, force } => commands::init(&path, force)?,
        command => {
            let config_path = cli
                .config
                .unwrap_or_else(|| PathBuf::from(&settings.config_path));
            let config = ConfigLoader::load_from_file(&config_path).with_context(|| {
                format!("Failed to load descriptor {}", config_path.display())
            })?;
            info!("Descriptor loaded from: {}", config_path.display());

            run(&config, command)?
        }
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn run(config: &config::Config, command: Command) -> types::Result<String> {
    match command {
        Command::Show { json: true } => commands::show_json(config),
        Command::Show { json: false } => commands::show(config),
        Command::Envs { with_feature } => commands::envs(config, with_feature.as_deref()),
        Command::Features => commands::features(config),
        Command::Feature { name, env, list } => {
            commands::feature(config, &name, env.as_deref(), list)
        }
        Command::Init { path, force } => commands::init(&path, force),
    }
}

/// Initialize logging on stderr so command output stays on stdout
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
    }

    debug!(level = %logging.level, format = %logging.format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_feature_command() {
        let cli = Cli::try_parse_from([
            "stagehand", "--config", "envs.yaml", "feature", "regions", "--env", "prod", "--list",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("envs.yaml")));
        match cli.command {
            Command::Feature { name, env, list } => {
                assert_eq!(name, "regions");
                assert_eq!(env.as_deref(), Some("prod"));
                assert!(list);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_run_against_example() {
        let config = ConfigLoader::example();
        let output = run(&config, Command::Envs { with_feature: Some("regions".to_string()) })
            .unwrap();
        assert_eq!(output, "prod [dev]");
    }
}
