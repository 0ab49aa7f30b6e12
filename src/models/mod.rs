//! Declared beacon-node API models and the consensus types they return.
//!
//! # Models
//!
//! - [`standard`] - The standard API, returned by [`Eth2HttpClient::api`](crate::http::Eth2HttpClient::api)
//! - [`lighthouse`] - Lighthouse-specific routes (votes, fork choice, operation pool)
//!
//! Both are plain route registries; any other model can be declared the same
//! way and hooked up with `extended_api`.

use crate::core::ContentType;

pub mod lighthouse;
pub mod primitives;
pub mod standard;

/// Endpoints returning consensus types can answer in either format.
pub const CONSENSUS_FORMATS: &[ContentType] = &[ContentType::Json, ContentType::Ssz];
