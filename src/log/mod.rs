pub mod structured_console_encoder;

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use log4rs::{
    Config,
    config::{Deserializers, RawConfig},
};

use crate::log::structured_console_encoder::StructuredConsoleEncoderDeserializer;

fn deserializers() -> Deserializers {
    let mut deserializers = Deserializers::default();
    deserializers.insert("structured_console", StructuredConsoleEncoderDeserializer);
    deserializers
}

/// Initializes logging from `path` when it exists, otherwise from the embedded defaults.
pub fn init_logging(path: &Path) -> Result<()> {
    if path.exists() {
        log4rs::init_file(path, deserializers())
            .with_context(|| format!("Failed to load external log configuration {}", path.display()))?;
        info!(
            path:% = path.display();
            "Logging initialized from external configuration"
        );
        return Ok(());
    }

    let config = embedded_config()?;
    log4rs::init_config(config).context("Failed to initialize logging from embedded config")?;

    debug!("Logging initialized from embedded defaults (no external log configuration found)");
    Ok(())
}

fn embedded_config() -> Result<Config> {
    let yaml_content = include_str!("../../resources/default_log4rs.yml");
    let raw_config: RawConfig =
        serde_yaml::from_str(yaml_content).context("Embedded logging configuration is invalid YAML")?;

    let (appenders, errors) = raw_config.appenders_lossy(&deserializers());
    if !errors.is_empty() {
        return Err(anyhow!("Errors parsing embedded appenders: {:?}", errors));
    }

    Config::builder()
        .appenders(appenders)
        .loggers(raw_config.loggers())
        .build(raw_config.root())
        .context("Failed to build logging config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_is_valid() {
        let config = embedded_config().unwrap();
        assert_eq!(config.appenders().len(), 2);
        assert!(config.loggers().iter().any(|l| l.name() == "eth2_api"));
    }
}
