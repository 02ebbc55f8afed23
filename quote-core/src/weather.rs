//! Resilient weather client.
//!
//! Fetches the degree-days figure for a design region from the weather API.
//! Server-side failures (HTTP 5xx) are retried with a fixed delay; client
//! errors, transport errors and malformed payloads are terminal. Every
//! modeled failure is absorbed here and surfaced to the caller as `None`,
//! never as an error.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::Config;

/// Failure modes of a single weather request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure before a response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// Server-side failure, worth another attempt.
    #[error("server error: HTTP {0}")]
    Server(StatusCode),

    /// Client-side rejection, retrying cannot help.
    #[error("client error: HTTP {0}")]
    Client(StatusCode),

    /// Response body was not the expected JSON shape.
    #[error("failed to decode weather response: {0}")]
    Decode(String),

    /// Response decoded, but `degreeDays` was missing or not a positive number.
    #[error("invalid degreeDays value {raw} in payload {body}")]
    InvalidDegreeDays { raw: String, body: String },
}

impl FetchError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Server(_))
    }
}

/// Retry policy for a logical weather request: a bounded number of retries
/// after the initial attempt, fixed delay in between.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 3, delay: Duration::from_millis(1000) }
    }
}

/// Run `request` until it succeeds, fails terminally, or the retry budget
/// is spent. The retry count lives here as a plain local, threaded through
/// nothing.
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, mut request: F) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0u32;
    loop {
        match request().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < policy.max_retries => {
                attempt += 1;
                warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    error = %err,
                    "retrying weather request"
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Untrusted weather API payload. Only `location.degreeDays` matters; the
/// other descriptive fields (ground temperature, postcode, coordinates) are
/// ignored.
#[derive(Debug, Deserialize)]
struct WeatherPayload {
    #[serde(default)]
    location: Option<LocationPayload>,
}

#[derive(Debug, Deserialize)]
struct LocationPayload {
    #[serde(rename = "degreeDays", default)]
    degree_days: Option<Value>,
}

/// Normalize the raw `degreeDays` field into a validated number.
///
/// Accepts a JSON number or a numeric string; the parsed value must be
/// finite and strictly positive. Anything else is rejected.
fn parse_degree_days(raw: &Value) -> Option<f64> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    (parsed.is_finite() && parsed > 0.0).then_some(parsed)
}

/// Source of degree-days figures, the seam between the quote engine and the
/// network boundary.
#[async_trait]
pub trait DegreeDaysProvider: Send + Sync {
    /// Resolve the degree-days figure for a design region, or `None` when no
    /// valid weather data could be obtained.
    async fn fetch_degree_days(&self, location: &str) -> Option<f64>;
}

/// HTTP implementation of [`DegreeDaysProvider`] against the weather API.
#[derive(Debug, Clone)]
pub struct WeatherService {
    http: Client,
    api_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl WeatherService {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            retry: RetryPolicy {
                max_retries: config.max_retries,
                delay: config.retry_delay(),
            },
        }
    }

    /// One GET to `{api_url}/weather?location=...`, classified by status.
    async fn request_once(&self, location: &str) -> Result<String, FetchError> {
        let url = format!("{}/weather", self.api_url);

        let res = self
            .http
            .get(&url)
            .query(&[("location", location)])
            .header("x-api-key", self.api_key.as_str())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = res.status();
        if status.is_server_error() {
            return Err(FetchError::Server(status));
        }
        if !status.is_success() {
            return Err(FetchError::Client(status));
        }

        res.text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }

    async fn try_fetch(&self, location: &str) -> Result<f64, FetchError> {
        let body = with_retry(&self.retry, || self.request_once(location)).await?;

        let payload: WeatherPayload =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        let raw = payload
            .location
            .as_ref()
            .and_then(|loc| loc.degree_days.as_ref());

        match raw.and_then(parse_degree_days) {
            Some(degree_days) => Ok(degree_days),
            None => Err(FetchError::InvalidDegreeDays {
                raw: raw.map_or_else(|| "missing".to_string(), Value::to_string),
                body,
            }),
        }
    }
}

#[async_trait]
impl DegreeDaysProvider for WeatherService {
    async fn fetch_degree_days(&self, location: &str) -> Option<f64> {
        match self.try_fetch(location).await {
            Ok(degree_days) => {
                debug!(%location, degree_days, "weather data fetched");
                Some(degree_days)
            }
            Err(err @ FetchError::InvalidDegreeDays { .. }) => {
                warn!(%location, %err, "rejected weather payload");
                None
            }
            Err(err) => {
                error!(%location, error = %err, "failed to fetch weather data");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn accepts_positive_number() {
        assert_eq!(parse_degree_days(&json!(1835)), Some(1835.0));
        assert_eq!(parse_degree_days(&json!(1835.5)), Some(1835.5));
    }

    #[test]
    fn accepts_numeric_string() {
        assert_eq!(parse_degree_days(&json!("1835.5")), Some(1835.5));
        assert_eq!(parse_degree_days(&json!(" 1835 ")), Some(1835.0));
    }

    #[test]
    fn rejects_non_numeric_string() {
        assert_eq!(parse_degree_days(&json!("invalid")), None);
        assert_eq!(parse_degree_days(&json!("")), None);
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert_eq!(parse_degree_days(&json!(0)), None);
        assert_eq!(parse_degree_days(&json!(-1835)), None);
        assert_eq!(parse_degree_days(&json!("-12.5")), None);
    }

    #[test]
    fn rejects_non_finite() {
        assert_eq!(parse_degree_days(&json!("NaN")), None);
        assert_eq!(parse_degree_days(&json!("inf")), None);
    }

    #[test]
    fn rejects_other_shapes() {
        assert_eq!(parse_degree_days(&json!(true)), None);
        assert_eq!(parse_degree_days(&json!({"value": 1835})), None);
        assert_eq!(parse_degree_days(&json!([1835])), None);
        assert_eq!(parse_degree_days(&json!(null)), None);
    }

    #[test]
    fn only_server_errors_are_retryable() {
        assert!(FetchError::Server(StatusCode::INTERNAL_SERVER_ERROR).is_retryable());
        assert!(FetchError::Server(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(!FetchError::Client(StatusCode::NOT_FOUND).is_retryable());
        assert!(!FetchError::Transport("connection refused".into()).is_retryable());
        assert!(!FetchError::Decode("eof".into()).is_retryable());
        assert!(
            !FetchError::InvalidDegreeDays { raw: "null".into(), body: "{}".into() }
                .is_retryable()
        );
    }

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy { max_retries, delay: Duration::from_millis(1) }
    }

    #[tokio::test]
    async fn with_retry_returns_first_success() {
        let calls = Arc::new(AtomicU32::new(0));

        let result = with_retry(&fast_policy(3), || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, FetchError>(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn with_retry_retries_server_errors_until_success() {
        let calls = Arc::new(AtomicU32::new(0));

        let result = with_retry(&fast_policy(3), || {
            let calls = Arc::clone(&calls);
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(FetchError::Server(StatusCode::INTERNAL_SERVER_ERROR))
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn with_retry_gives_up_after_budget() {
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<i32, _> = with_retry(&fast_policy(3), || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(FetchError::Server(StatusCode::SERVICE_UNAVAILABLE))
            }
        })
        .await;

        assert!(result.is_err());
        // 1 initial + 3 retries.
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn with_retry_does_not_retry_terminal_errors() {
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<i32, _> = with_retry(&fast_policy(3), || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(FetchError::Client(StatusCode::NOT_FOUND))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn with_retry_zero_budget_tries_once() {
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<i32, _> = with_retry(&fast_policy(0), || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(FetchError::Server(StatusCode::INTERNAL_SERVER_ERROR))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
