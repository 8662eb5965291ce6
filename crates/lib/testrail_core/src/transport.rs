// @zen-component: TR-HttpTransport
//
//! HTTP transport for the TestRail API v2.
//!
//! One `reqwest::Client` (and so one connection pool) is shared by every
//! resource module. Requests use HTTP basic auth. Transient failures
//! (429, 500, 502, 503, 504) are retried with exponential backoff up to
//! [`RetryPolicy::max_attempts`]; every other outcome is classified into an
//! [`ApiError`] immediately.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::config::{ClientConfig, ConfigError};
use crate::error::{ApiError, error_message};

/// Status codes that are retried automatically.
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Path prefix every TestRail v2 endpoint lives under.
const API_PREFIX: &str = "index.php?/api/v2/";

/// HTTP verbs used by operation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Bounded automatic-retry policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for each further attempt.
    pub base_delay: Duration,
    /// Upper bound for any single delay, `Retry-After` hints included.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Whether `status` is in the transient set.
    pub fn is_retryable(status: u16) -> bool {
        RETRYABLE_STATUSES.contains(&status)
    }

    /// Whether a response with `status` on attempt number `attempt` (1-based)
    /// should be retried.
    pub fn should_retry(&self, status: u16, attempt: u32) -> bool {
        Self::is_retryable(status) && attempt < self.max_attempts
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let computed = self.base_delay.saturating_mul(2u32.saturating_pow(exponent));
        let delay = match retry_after {
            Some(hint) => hint.max(computed),
            None => computed,
        };
        delay.min(self.max_delay)
    }
}

/// Shared HTTP transport bound to one TestRail instance.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    username: String,
    api_key: String,
    retry: RetryPolicy,
}

impl HttpTransport {
    /// Build the transport and its connection pool.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("testrail-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            api_key: config.api_key.clone(),
            retry: config.retry.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full endpoint URL.
    ///
    /// TestRail routes through the query string (`index.php?/api/v2/...`),
    /// so additional query parameters are appended with `&`.
    pub fn build_url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = format!("{}/{}{}", self.base_url, API_PREFIX, path.trim_start_matches('/'));
        for (key, value) in query {
            url.push('&');
            url.extend(form_urlencoded::byte_serialize(key.as_bytes()));
            url.push('=');
            url.extend(form_urlencoded::byte_serialize(value.as_bytes()));
        }
        url
    }

    /// Send a request, retrying transient statuses per the retry policy.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = self.build_url(path, query);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let mut builder = self.auth(self.client.request(method.as_reqwest(), &url));
            if let Some(body) = body {
                builder = builder.json(body);
            }

            debug!(?method, %path, attempt, "sending TestRail request");
            let response = builder
                .send()
                .await
                .map_err(|e| ApiError::Connection(e.to_string()))?;

            let status = response.status().as_u16();
            if self.retry.should_retry(status, attempt) {
                let delay = self.retry.backoff(attempt, retry_after(&response).map(Duration::from_secs));
                warn!(
                    %path,
                    status,
                    attempt,
                    max_attempts = self.retry.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "transient TestRail failure, retrying"
                );
                sleep(delay).await;
                continue;
            }

            return self.handle_response(response).await;
        }
    }

    fn auth(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .basic_auth(&self.username, Some(&self.api_key))
            .header(CONTENT_TYPE, "application/json")
    }

    /// Decode a success body or classify a failure.
    async fn handle_response(&self, response: Response) -> Result<Value, ApiError> {
        let status = response.status();
        let retry_after = retry_after(&response);
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Connection(format!("failed to read response body: {e}")))?;

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&body)
                .map_err(|e| ApiError::Decode(format!("response is not valid JSON: {e}")));
        }

        Err(classify_failure(
            status.as_u16(),
            status.canonical_reason().unwrap_or("request failed"),
            &body,
            retry_after,
        ))
    }
}

/// Map a non-success status to the error taxonomy.
pub fn classify_failure(
    status: u16,
    reason: &str,
    body: &str,
    retry_after: Option<u64>,
) -> ApiError {
    let message = error_message(body, reason);
    match status {
        401 => ApiError::Authentication { message },
        429 => ApiError::RateLimit {
            message,
            retry_after,
        },
        _ => ApiError::Api {
            status,
            message,
            body: body.to_string(),
        },
    }
}

/// Parse a `Retry-After` header given in whole seconds.
fn retry_after(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
