//! Typed client for the Eth2 beacon-node HTTP API.
//!
//! APIs are declared as [`route::RouteModel`] trees of routes, endpoints and
//! variable path segments. Binding a model to a provider yields an
//! [`route::EndpointNode`] that is traversed by name and invoked to issue
//! requests, with values encoded as JSON objects ([`obj`]) or SSZ ([`ssz`]).

pub mod config;
pub mod core;
pub mod error;
pub mod http;
pub mod log;
pub mod models;
pub mod obj;
pub mod route;
pub mod ssz;

pub use crate::core::{ApiPath, ContentType, Eth2Provider, Method};
pub use crate::error::{ApiError, DeclarationError};
pub use crate::http::{Eth2HttpClient, Eth2HttpOptions, Eth2HttpProvider};
