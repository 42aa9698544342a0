//! Test helpers for integration tests
//!
//! Provides a test server that exposes a [`RuleStore`] over HTTP and
//! constructors for rule clients wired to either transport.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use automod_client::{HttpExecutor, RuleClient, AUDIT_LOG_REASON};
use automod_common::{try_init_tracing_with_config, ApiConfig, ApiErrorBody, TracingConfig};
use automod_core::{ApiRequest, ExecutorError, RequestExecutor};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, RETRY_AFTER};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::store::RuleStore;

/// Token the test server accepts
pub const TEST_TOKEN: &str = "test-bot-token";

/// Path prefix the test server serves the API under
pub const API_PREFIX: &str = "/api/v10";

/// Route test logs through the harness; safe to call from every test
pub fn init_test_tracing() {
    let _ = try_init_tracing_with_config(&TracingConfig::test());
}

/// Rule client talking to `store` directly, without HTTP
pub fn direct_client(store: &Arc<RuleStore>) -> RuleClient {
    let executor: Arc<dyn RequestExecutor> = store.clone();
    RuleClient::new(executor)
}

#[derive(Clone)]
struct ServerState {
    store: Arc<RuleStore>,
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<RuleStore>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with an empty store
    pub async fn start() -> Result<Self> {
        Self::start_with_store(Arc::new(RuleStore::new())).await
    }

    /// Start a test server in front of an existing store
    pub async fn start_with_store(store: Arc<RuleStore>) -> Result<Self> {
        init_test_tracing();

        let app = Router::new().fallback(handle).with_state(ServerState {
            store: store.clone(),
        });

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            store,
            _handle: handle,
        })
    }

    /// Get base URL for the API
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX)
    }

    /// Client settings pointing at this server
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.base_url(), TEST_TOKEN)
    }

    /// Rule client going through `HttpExecutor`
    pub fn client(&self) -> Result<RuleClient> {
        self.client_with_config(&self.api_config())
    }

    pub fn client_with_config(&self, config: &ApiConfig) -> Result<RuleClient> {
        let executor = HttpExecutor::new(config)?;
        Ok(RuleClient::new(Arc::new(executor)))
    }
}

/// Translate an HTTP request into an `ApiRequest` for the store and the
/// store's answer back into an HTTP response
async fn handle(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let expected = format!("Bot {TEST_TOKEN}");
    if headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) != Some(expected.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiErrorBody::new(0, "401: Unauthorized")),
        )
            .into_response();
    }

    let Some(path) = uri.path().strip_prefix(API_PREFIX) else {
        return (StatusCode::NOT_FOUND, Json(ApiErrorBody::new(0, "404: Not Found"))).into_response();
    };

    let mut request = ApiRequest::new(method, path);
    if let Some(reason) = headers.get(AUDIT_LOG_REASON) {
        request = request.with_header(HeaderName::from_static(AUDIT_LOG_REASON), reason.clone());
    }
    if !body.is_empty() {
        match serde_json::from_slice(&body) {
            Ok(json) => request = request.with_body(json),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiErrorBody::new(50109, "The request body contains invalid JSON.")),
                )
                    .into_response()
            }
        }
    }

    match state.store.execute(request).await {
        Ok(Some(json)) => (StatusCode::OK, Json(json)).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ExecutorError) -> Response {
    match error {
        ExecutorError::NotFound { message } => {
            (StatusCode::NOT_FOUND, Json(ApiErrorBody::new(10066, message))).into_response()
        }
        ExecutorError::Forbidden { message } => {
            (StatusCode::FORBIDDEN, Json(ApiErrorBody::new(50013, message))).into_response()
        }
        ExecutorError::RateLimited {
            retry_after,
            global,
        } => (
            StatusCode::TOO_MANY_REQUESTS,
            [(RETRY_AFTER, retry_after.as_secs().max(1).to_string())],
            Json(ApiErrorBody::rate_limited(retry_after, global)),
        )
            .into_response(),
        ExecutorError::Status {
            status,
            code,
            message,
        } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(ApiErrorBody::new(code.unwrap_or(0), message)),
        )
            .into_response(),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorBody::new(0, other.to_string())),
        )
            .into_response(),
    }
}
