use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    // Logs go to stderr so command output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
}

/// Priority: `--config` > ./config/config.yaml > <config dir>/famrelay/config.yaml
pub fn resolve_config_path(config_path: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        return Ok(path.clone());
    }
    let local_config = PathBuf::from("config/config.yaml");
    if local_config.exists() {
        return Ok(local_config);
    }
    let mut path = dirs::config_dir().context("Failed to get config directory")?;
    path.push("famrelay");
    path.push("config.yaml");
    Ok(path)
}

pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let path = resolve_config_path(config_path)?;
    let config = read_config(&path).await?;
    Ok(LoadedConfig { config, path })
}

/// Parses the file at `path`; a missing file yields the defaults.
pub async fn read_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        warn!("Config file not found, using defaults: {}", path.display());
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)
        .await
        .context("Failed to read config file")?;
    let config: Config = serde_yaml::from_str(&content).context("Failed to parse config file")?;
    info!("Loaded configuration from: {}", path.display());
    Ok(config)
}
