use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::BridgeConfig;

pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level: tracing::Level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: BridgeConfig,
    pub path: PathBuf,
    /// Whether `path` existed; defaults are used otherwise.
    pub from_file: bool,
}

pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let config_path = match config_path {
        Some(path) => path.clone(),
        None => {
            // ./config/scribebridge.yaml wins over the per-user file
            let local_config = PathBuf::from("config/scribebridge.yaml");
            if local_config.exists() {
                local_config
            } else {
                let mut path = dirs::config_dir().context("Failed to get config directory")?;
                path.push("scribebridge");
                path.push("config.yaml");
                path
            }
        }
    };

    let (mut config, from_file) = if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .await
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config = BridgeConfig::from_yaml(&content).context("Failed to parse config file")?;
        info!("Loaded configuration from: {}", config_path.display());
        (config, true)
    } else {
        warn!(
            "Config file not found, using defaults: {}",
            config_path.display()
        );
        (BridgeConfig::default(), false)
    };
    config.apply_env();

    Ok(LoadedConfig {
        config,
        path: config_path,
        from_file,
    })
}
