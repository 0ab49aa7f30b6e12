use std::{fs, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use config::{Config, Environment};
use log::info;

use super::defaults::ClientConfig;

pub fn get_default_config() -> &'static str {
    include_str!("../../config/config.toml")
}

/// Loads the configuration file, creating it from the defaults when missing.
/// `ETH2_`-prefixed environment variables override file values, with `__`
/// separating nested keys (`ETH2_CLIENT__API_BASE_URL`).
pub fn load_configuration(path: &Path) -> Result<Config> {
    if !path.exists() {
        let sources = get_default_config();
        write_config_to(path, sources).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let filename = path.to_str().context("Invalid config file path")?;

    Config::builder()
        .add_source(config::File::with_name(filename))
        .add_source(
            Environment::with_prefix("ETH2")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Could not build config")
}

/// Reads the `[client]` section, falling back to defaults when it is absent.
pub fn load_client_config(path: &Path) -> Result<ClientConfig> {
    let cfg = load_configuration(path)?;
    match cfg.get::<ClientConfig>(ClientConfig::main_key_prefix()) {
        Ok(client) => Ok(client),
        Err(config::ConfigError::NotFound(_)) => Ok(ClientConfig::default()),
        Err(e) => Err(e).context("Invalid client configuration"),
    }
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    file.write_all(b"\n").context("Failed to write newline")?;
    Ok(())
}
