use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::ContentType;
use crate::http::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT, Eth2HttpOptions};

/// The `[client]` section of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub default_req_type: ContentType,
    pub default_resp_type: ContentType,
    pub timeout_ms: u64,
    pub max_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_req_type: ContentType::Json,
            default_resp_type: ContentType::Json,
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            max_retries: 0,
        }
    }
}

impl ClientConfig {
    pub fn main_key_prefix() -> &'static str {
        "client"
    }

    /// Command line overrides take precedence over the file and environment.
    pub fn apply_node(&mut self, base_url: Option<&str>, resp_type: Option<ContentType>) {
        if let Some(base_url) = base_url {
            self.api_base_url = base_url.to_string();
        }
        if let Some(resp_type) = resp_type {
            self.default_resp_type = resp_type;
        }
    }
}

impl From<&ClientConfig> for Eth2HttpOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            api_base_url: config.api_base_url.clone(),
            default_req_type: config.default_req_type,
            default_resp_type: config.default_resp_type,
            default_timeout: Duration::from_millis(config.timeout_ms),
            max_retries: config.max_retries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_provider_options() {
        let options = Eth2HttpOptions::from(&ClientConfig::default());
        assert_eq!(options, Eth2HttpOptions::default());
    }

    #[test]
    fn cli_overrides() {
        let mut config = ClientConfig::default();
        config.apply_node(Some("http://node:4000"), Some(ContentType::Ssz));
        assert_eq!(config.api_base_url, "http://node:4000");
        assert_eq!(config.default_resp_type, ContentType::Ssz);
        config.apply_node(None, None);
        assert_eq!(config.api_base_url, "http://node:4000");
    }
}
