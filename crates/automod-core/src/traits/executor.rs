//! Request executor port
//!
//! The rule client describes each call as an [`ApiRequest`]; an executor
//! performs the round trip. Retries, rate-limit back-off and connection reuse
//! all belong to the executor implementation.

use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde_json::Value;

use crate::error::ExecResult;

/// A single API call: method, guild-scoped path, headers and optional JSON body
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, starting with `/`
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PATCH, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Performs API round trips on behalf of the rule client
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute the request
    ///
    /// Returns `Ok(None)` for successful responses without a body (204).
    async fn execute(&self, request: ApiRequest) -> ExecResult<Option<Value>>;
}
