//! Wire-level vocabulary shared by route models and providers.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ApiError;
use crate::http::HttpError;
use crate::route::{ApiResponse, Args, EndpointFn};

/// The two wire formats an endpoint can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Json,
    Ssz,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::Ssz => "application/ssz",
        }
    }

    /// Parses a `Content-Type` header value, ignoring parameters such as `charset`.
    pub fn from_header(value: &str) -> Result<Self, ApiError> {
        let mime = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        match mime.as_str() {
            "application/json" => Ok(ContentType::Json),
            "application/ssz" | "application/octet-stream" => Ok(ContentType::Ssz),
            _ => Err(ApiError::UnknownContentType(value.to_string())),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP methods used by the node API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        };
        f.write_str(name)
    }
}

/// A route path accumulated while walking a route model.
///
/// Every traversal step returns a new path; an existing path is never changed.
/// Segments are kept unencoded and only percent-encoded when the URL is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ApiPath {
    segments: Vec<String>,
}

impl ApiPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Appends a route name. Names containing `/` (for example `validators/all`)
    /// contribute one segment per part.
    pub fn join(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(name.split('/').filter(|s| !s.is_empty()).map(str::to_string));
        Self { segments }
    }

    /// Appends a rendered variable value as a single segment, whatever it contains.
    pub fn join_fragment(&self, fragment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(fragment.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolves this path against `base` with URL-join semantics: the path
    /// replaces whatever path the base URL carried.
    pub fn to_url(&self, base: &Url) -> Result<Url, HttpError> {
        let mut url = base.join("/")?;
        url.path_segments_mut()
            .map_err(|_| HttpError::InvalidBaseUrl(base.to_string()))?
            .clear()
            .extend(&self.segments);
        Ok(url)
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Something that can execute a bound endpoint.
///
/// Resolution nodes hand the provider the path they accumulated and the
/// endpoint descriptor being called; the provider owns everything on the wire.
#[async_trait]
pub trait Eth2Provider: Send + Sync {
    async fn api_request(&self, path: &ApiPath, endpoint: &EndpointFn, args: Args) -> Result<ApiResponse, ApiError>;
}
