use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Method, StatusCode};
use tokio::sync::RwLock;
use url::Url;

use super::error::HttpError;

/// One request as issued by the provider.
#[derive(Debug, Clone)]
pub(crate) struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Vec<u8>>,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub timeout: Duration,
}

/// A successful response, read in full.
#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

pub(crate) struct HttpClient {
    client: reqwest_middleware::ClientWithMiddleware,
    last_latency: RwLock<Option<(Duration, Instant)>>,
}

impl HttpClient {
    /// Retries of transient failures are only wired in when `max_retries` is non-zero.
    pub fn with_config(max_retries: u32, timeout: Duration) -> Result<Self, HttpError> {
        let inner_client = reqwest::Client::builder().timeout(timeout).build()?;

        let mut builder = reqwest_middleware::ClientBuilder::new(inner_client);
        if max_retries > 0 {
            let retry_policy =
                reqwest_retry::policies::ExponentialBackoff::builder().build_with_max_retries(max_retries);
            builder = builder.with(reqwest_retry::RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        Ok(Self {
            client: builder.build(),
            last_latency: RwLock::new(None),
        })
    }

    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let start = Instant::now();

        let mut req = self
            .client
            .request(request.method, request.url)
            .headers(request.headers)
            .timeout(request.timeout);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let resp = req.send().await?;
        let latency = start.elapsed();
        self.update_latency(latency).await;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".into());
            return Err(HttpError::ServerError { status, body });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }

    async fn update_latency(&self, duration: Duration) {
        *self.last_latency.write().await = Some((duration, Instant::now()));
    }

    pub async fn get_latency(&self) -> Option<Duration> {
        self.last_latency.read().await.map(|(d, _)| d)
    }
}
