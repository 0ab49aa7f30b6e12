//! Scoped HTTP client for beacon-node APIs.
//!
//! [`Eth2HttpClient`] owns the transport for as long as it lives: opening it
//! builds the connection pool and dropping it releases the pool, on success
//! and on error paths alike.
//!
//! # Example
//!
//! ```rust,no_run
//! use eth2_api::http::{Eth2HttpClient, Eth2HttpOptions};
//! use eth2_api::models::primitives::Slot;
//! use eth2_api::route::Args;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let client = Eth2HttpClient::open(Eth2HttpOptions::default())?;
//! let api = client.api()?;
//!
//! let fork = api
//!     .route("beacon")?
//!     .route("states")?
//!     .route("slot")?
//!     .at(Slot(1))?
//!     .endpoint("fork")?
//!     .call(Args::new())
//!     .await?;
//! println!("{:?}", fork);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::error::ApiError;
use crate::models::standard;
use crate::route::{EndpointNode, RouteModel};

use super::HttpError;
use super::provider::Eth2HttpProvider;
use super::types::Eth2HttpOptions;

/// Entry point for talking to a beacon node over HTTP.
///
/// # Thread Safety
///
/// The client and every node it hands out are `Send + Sync`; calls may be
/// issued from multiple async tasks concurrently.
pub struct Eth2HttpClient {
    provider: Arc<Eth2HttpProvider>,
}

impl Eth2HttpClient {
    /// Opens the transport with the given options.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be initialized.
    pub fn open(options: Eth2HttpOptions) -> Result<Self, HttpError> {
        debug!(
            base_url = options.api_base_url.as_str(),
            timeout:? = options.default_timeout;
            "HTTP: Opening beacon node client"
        );
        let provider = Eth2HttpProvider::new(options)?;
        Ok(Self {
            provider: Arc::new(provider),
        })
    }

    pub fn options(&self) -> &Eth2HttpOptions {
        self.provider.options()
    }

    pub fn provider(&self) -> Arc<Eth2HttpProvider> {
        self.provider.clone()
    }

    /// Root node of the standard beacon-node API.
    pub fn api(&self) -> Result<EndpointNode, ApiError> {
        Ok(self.provider.extended_api(standard::eth2_api()?))
    }

    /// Root node of any declared API model, for example a client-specific one.
    pub fn extended_api(&self, model: Arc<RouteModel>) -> EndpointNode {
        self.provider.extended_api(model)
    }

    /// Returns the latency of the most recent HTTP request, if any was made.
    pub async fn get_last_request_latency(&self) -> Option<Duration> {
        self.provider.last_latency().await
    }
}
