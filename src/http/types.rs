use std::time::Duration;

use crate::core::ContentType;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5052/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Provider-wide settings, fixed when the provider is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eth2HttpOptions {
    /// Base URL of the beacon node; route paths replace its path component.
    pub api_base_url: String,
    /// Request body format used when an endpoint does not pin one.
    pub default_req_type: ContentType,
    /// Preferred response format, only requested from endpoints that support it.
    pub default_resp_type: ContentType,
    pub default_timeout: Duration,
    /// Transport-level retries of transient failures. Zero disables them.
    pub max_retries: u32,
}

impl Default for Eth2HttpOptions {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_req_type: ContentType::Json,
            default_resp_type: ContentType::Json,
            default_timeout: DEFAULT_TIMEOUT,
            max_retries: 0,
        }
    }
}
