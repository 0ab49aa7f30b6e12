//! The HTTP implementation of [`Eth2Provider`].
//!
//! A call of a bound endpoint goes through these steps:
//!
//! 1. positional arguments fill the declared parameters not given by keyword;
//! 2. the `Accept` header is the pinned response type, else the provider
//!    default when the endpoint supports it, else absent;
//! 3. the request type is the pinned request type, else the provider default;
//! 4. the body parameter, if declared, is required and encoded in the request type;
//! 5. the remaining keyword arguments become query parameters;
//! 6. a non-success status fails the call with the response body;
//! 7. the response type comes from `Content-Type`, checked against a pinned type;
//! 8. the response type must be one the endpoint supports;
//! 9. the body is decoded through the endpoint's declared result type.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use crate::core::{ApiPath, ContentType, Eth2Provider};
use crate::error::ApiError;
use crate::obj::ObjType;
use crate::route::{ApiResponse, Arg, Args, EndpointFn, EndpointNode, RouteModel};

use super::HttpError;
use super::http_client::{HttpClient, HttpRequest};
use super::types::Eth2HttpOptions;

/// Executes bound endpoints against a beacon node over HTTP.
///
/// The provider is cheap to share: wrap it in an `Arc` and hand it to any
/// number of [`EndpointNode`]s, which may issue calls concurrently.
pub struct Eth2HttpProvider {
    options: Eth2HttpOptions,
    base_url: Url,
    client: HttpClient,
}

impl Eth2HttpProvider {
    /// Creates a provider with its own transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be initialized.
    pub fn new(options: Eth2HttpOptions) -> Result<Self, HttpError> {
        let base_url = Url::parse(&options.api_base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(HttpError::InvalidBaseUrl(options.api_base_url));
        }
        let client = HttpClient::with_config(options.max_retries, options.default_timeout)?;
        Ok(Self {
            options,
            base_url,
            client,
        })
    }

    pub fn options(&self) -> &Eth2HttpOptions {
        &self.options
    }

    /// Hooks any declared route model to this provider.
    pub fn extended_api(self: &Arc<Self>, model: Arc<RouteModel>) -> EndpointNode {
        EndpointNode::root(self.clone(), model)
    }

    pub(crate) async fn last_latency(&self) -> Option<std::time::Duration> {
        self.client.get_latency().await
    }
}

#[async_trait]
impl Eth2Provider for Eth2HttpProvider {
    async fn api_request(&self, path: &ApiPath, endpoint: &EndpointFn, args: Args) -> Result<ApiResponse, ApiError> {
        let mut kwargs = bind_args(endpoint, args)?;

        let mut headers = HeaderMap::new();
        if let Some(accept) = accept_type(endpoint, self.options.default_resp_type) {
            headers.insert(ACCEPT, HeaderValue::from_static(accept.as_str()));
        }

        let req_type = endpoint.req_type.unwrap_or(self.options.default_req_type);
        let body = match &endpoint.data {
            Some(key) => {
                let value = take_kwarg(&mut kwargs, key).ok_or_else(|| ApiError::MissingBody(key.clone()))?;
                let body = encode_body(req_type, &value)?;
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(req_type.as_str()));
                Some(body)
            },
            None => None,
        };

        let url = path.to_url(&self.base_url)?;
        let request = HttpRequest {
            method: endpoint.method.into(),
            url,
            body,
            query: query_params(&kwargs),
            headers,
            timeout: self.options.default_timeout,
        };
        debug!(
            method:% = endpoint.method,
            url:% = request.url,
            endpoint = endpoint.decl_name.as_str();
            "HTTP: Sending API request"
        );

        let response = match self.client.request(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    path:% = path,
                    error:% = e;
                    "HTTP: API request failed"
                );
                return Err(e.into());
            },
        };

        let content_type = response_type(endpoint, response.content_type.as_deref(), self.options.default_resp_type)?;
        if !endpoint.supports.contains(&content_type) {
            return Err(ApiError::NotSupported(content_type));
        }
        debug!(
            status:% = response.status,
            content_type:% = content_type,
            bytes = response.body.len();
            "HTTP: Decoding API response"
        );

        match content_type {
            ContentType::Ssz => endpoint.typ.decode_ssz(&response.body),
            ContentType::Json => endpoint.typ.decode_json(&response.body),
        }
    }
}

/// Matches positional arguments to the declared parameters that were not
/// passed by keyword, in declaration order.
fn bind_args(endpoint: &EndpointFn, args: Args) -> Result<Vec<(String, Arg)>, ApiError> {
    let (positional, mut kwargs) = args.into_parts();
    let missing: Vec<&String> = endpoint
        .arg_keys
        .iter()
        .filter(|key| !kwargs.iter().any(|(k, _)| k == *key))
        .collect();

    if !positional.is_empty() && positional.len() != missing.len() {
        return Err(ApiError::ArgumentMismatch {
            got: positional.len(),
            expected: missing.len(),
            keys: missing.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", "),
        });
    }

    let filled: Vec<(String, Arg)> = missing.into_iter().cloned().zip(positional).collect();
    kwargs.extend(filled);
    Ok(kwargs)
}

fn take_kwarg(kwargs: &mut Vec<(String, Arg)>, key: &str) -> Option<Arg> {
    let idx = kwargs.iter().position(|(k, _)| k == key)?;
    Some(kwargs.remove(idx).1)
}

fn accept_type(endpoint: &EndpointFn, default_resp_type: ContentType) -> Option<ContentType> {
    match endpoint.resp_type {
        Some(pinned) => Some(pinned),
        None if endpoint.supports.contains(&default_resp_type) => Some(default_resp_type),
        None => None,
    }
}

fn encode_body(req_type: ContentType, value: &Arg) -> Result<Vec<u8>, ApiError> {
    match req_type {
        ContentType::Json => Ok(serde_json::to_vec(&value.to_obj())?),
        ContentType::Ssz => value
            .ssz_bytes()
            .ok_or_else(|| ApiError::NotSszType(format!("{value:?}"))),
    }
}

/// Query parameters from keyword arguments. `None` values are left out,
/// sequences repeat their key and mappings travel as JSON text.
fn query_params(kwargs: &[(String, Arg)]) -> Vec<(String, String)> {
    let mut params = Vec::new();
    for (key, value) in kwargs {
        match value.to_obj() {
            ObjType::Null => {},
            ObjType::Array(items) => {
                for item in items {
                    if let Some(text) = query_scalar(item) {
                        params.push((key.clone(), text));
                    }
                }
            },
            other => {
                if let Some(text) = query_scalar(other) {
                    params.push((key.clone(), text));
                }
            },
        }
    }
    params
}

fn query_scalar(value: ObjType) -> Option<String> {
    match value {
        ObjType::Null => None,
        ObjType::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// The content type of a response: the `Content-Type` header when present,
/// otherwise the pinned response type or the provider default.
fn response_type(
    endpoint: &EndpointFn,
    header: Option<&str>,
    default_resp_type: ContentType,
) -> Result<ContentType, ApiError> {
    let Some(header) = header else {
        return Ok(endpoint.resp_type.unwrap_or(default_resp_type));
    };
    let actual = ContentType::from_header(header)?;
    match endpoint.resp_type {
        Some(pinned) if pinned != actual => Err(ApiError::ContentTypeMismatch {
            expected: pinned,
            got: actual,
        }),
        _ => Ok(actual),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::route::api;

    fn state_endpoint() -> EndpointFn {
        api("state")
            .params(&["root", "slot"])
            .supports(&[ContentType::Json, ContentType::Ssz])
            .build()
            .unwrap()
    }

    #[test]
    fn positional_args_fill_missing_parameters_in_order() {
        let endpoint = state_endpoint();
        let kwargs = bind_args(&endpoint, Args::new().arg("0xaa").arg(3u64)).unwrap();
        assert_eq!(kwargs[0].0, "root");
        assert_eq!(kwargs[1].0, "slot");

        let kwargs = bind_args(&endpoint, Args::new().kw("root", "0xaa").arg(3u64)).unwrap();
        assert_eq!(kwargs.len(), 2);
        assert_eq!(kwargs[1].0, "slot");
        assert_eq!(kwargs[1].1.to_obj(), json!(3));
    }

    #[test]
    fn positional_count_must_match_missing_parameters() {
        let endpoint = state_endpoint();
        let err = bind_args(&endpoint, Args::new().arg(3u64)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected arguments, got 1 args but expected 2 (root, slot)"
        );
        // Optional parameters may all be left out.
        assert!(bind_args(&endpoint, Args::new()).unwrap().is_empty());
    }

    #[test]
    fn accept_prefers_pinned_then_supported_default() {
        let json_only = api("enr").build().unwrap();
        assert_eq!(accept_type(&json_only, ContentType::Json), Some(ContentType::Json));
        assert_eq!(accept_type(&json_only, ContentType::Ssz), None);

        let pinned = api("state")
            .supports(&[ContentType::Json, ContentType::Ssz])
            .resp_type(ContentType::Ssz)
            .build()
            .unwrap();
        assert_eq!(accept_type(&pinned, ContentType::Json), Some(ContentType::Ssz));
    }

    #[test]
    fn body_encoding_follows_request_type() {
        assert_eq!(encode_body(ContentType::Json, &Arg::from(5u64)).unwrap(), b"5");
        assert_eq!(encode_body(ContentType::Ssz, &Arg::from(5u64)).unwrap(), vec![5, 0, 0, 0, 0, 0, 0, 0]);
        assert!(matches!(
            encode_body(ContentType::Ssz, &Arg::from(json!({"epoch": 1}))),
            Err(ApiError::NotSszType(_))
        ));
    }

    #[test]
    fn query_params_skip_none_and_expand_lists() {
        let kwargs = vec![
            ("root".to_string(), Arg::none()),
            ("slot".to_string(), Arg::from(1u64)),
            ("id".to_string(), Arg::from(json!(["0x01", 2]))),
            ("filter".to_string(), Arg::from(json!({"status": "active"}))),
        ];
        assert_eq!(query_params(&kwargs), vec![
            ("slot".to_string(), "1".to_string()),
            ("id".to_string(), "0x01".to_string()),
            ("id".to_string(), "2".to_string()),
            ("filter".to_string(), r#"{"status":"active"}"#.to_string()),
        ]);
    }

    #[test]
    fn response_type_resolution() {
        let endpoint = state_endpoint();
        assert_eq!(
            response_type(&endpoint, Some("application/ssz"), ContentType::Json).unwrap(),
            ContentType::Ssz
        );
        assert_eq!(response_type(&endpoint, None, ContentType::Ssz).unwrap(), ContentType::Ssz);

        let mut pinned = endpoint.clone();
        pinned.resp_type = Some(ContentType::Json);
        assert_eq!(response_type(&pinned, None, ContentType::Ssz).unwrap(), ContentType::Json);
        let err = response_type(&pinned, Some("application/octet-stream"), ContentType::Json).unwrap_err();
        assert!(err.to_string().starts_with("unsupported content type"));

        assert!(matches!(
            response_type(&endpoint, Some("text/html"), ContentType::Json),
            Err(ApiError::UnknownContentType(_))
        ));
    }

    #[test]
    fn provider_rejects_unusable_base_urls() {
        let options = Eth2HttpOptions {
            api_base_url: "mailto:node@example.com".into(),
            ..Default::default()
        };
        assert!(matches!(Eth2HttpProvider::new(options), Err(HttpError::InvalidBaseUrl(_))));
        assert!(matches!(
            Eth2HttpProvider::new(Eth2HttpOptions {
                api_base_url: "not a url".into(),
                ..Default::default()
            }),
            Err(HttpError::UrlError(_))
        ));
        let provider = Eth2HttpProvider::new(Eth2HttpOptions::default()).unwrap();
        assert_eq!(provider.options().default_req_type, ContentType::Json);
    }
}
