//! `reqwest`-backed request executor
//!
//! Sends rule requests to the platform REST API and classifies the response
//! into the executor error kinds.

use std::time::Duration;

use async_trait::async_trait;
use automod_common::{ApiConfig, ApiErrorBody};
use automod_core::{ApiRequest, ExecResult, ExecutorError, RequestExecutor};
use http::header::{AUTHORIZATION, RETRY_AFTER};
use http::{HeaderMap, HeaderValue, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

/// Errors building an [`HttpExecutor`]
#[derive(Debug, thiserror::Error)]
pub enum HttpExecutorError {
    #[error("bot token is not a valid header value")]
    InvalidToken,

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Executor talking to the REST API over HTTPS
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
    base_url: String,
}

impl HttpExecutor {
    /// Build a client with authorization, user agent and timeout from `config`
    pub fn new(config: &ApiConfig) -> Result<Self, HttpExecutorError> {
        let mut authorization = HeaderValue::from_str(&config.authorization())
            .map_err(|_| HttpExecutorError::InvalidToken)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: ApiRequest) -> ExecResult<Option<Value>> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let header_retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<f64>().ok());
        let bytes = response.bytes().await.map_err(transport_error)?;

        debug!(status = status.as_u16(), len = bytes.len(), "Response received");

        if status.is_success() {
            if status == StatusCode::NO_CONTENT || bytes.is_empty() {
                return Ok(None);
            }
            return serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| ExecutorError::InvalidBody(e.to_string()));
        }

        Err(status_error(status, header_retry_after, &bytes))
    }
}

fn transport_error(err: reqwest::Error) -> ExecutorError {
    if err.is_timeout() {
        ExecutorError::Timeout
    } else {
        ExecutorError::Network(err.to_string())
    }
}

/// Classify a non-success response, reading the platform error body if any
fn status_error(status: StatusCode, header_retry_after: Option<f64>, body: &[u8]) -> ExecutorError {
    let parsed: Option<ApiErrorBody> = serde_json::from_slice(body).ok();
    let message = parsed
        .as_ref()
        .map(|b| b.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    match status {
        StatusCode::NOT_FOUND => ExecutorError::NotFound { message },
        StatusCode::FORBIDDEN => ExecutorError::Forbidden { message },
        StatusCode::TOO_MANY_REQUESTS => {
            let seconds = parsed
                .as_ref()
                .and_then(|b| b.retry_after)
                .or(header_retry_after)
                .unwrap_or_default();
            ExecutorError::RateLimited {
                retry_after: Duration::try_from_secs_f64(seconds).unwrap_or_default(),
                global: parsed.and_then(|b| b.global).unwrap_or(false),
            }
        }
        _ => ExecutorError::Status {
            status: status.as_u16(),
            code: parsed.map(|b| b.code).filter(|c| *c != 0),
            message,
        },
    }
}
