//! Fake-request mode for tests and documentation.
//!
//! # Design
//! When a builder is constructed with `debug: true`, terminal calls stop
//! right before the transport and return a `FakeRequest` snapshot instead,
//! serialized into the usual `ApiResponse` shape. The transport is never
//! touched, not even partially, so debug builders are safe to point at
//! production URLs.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::http::{ApiResponse, Method, TransportRequest};

/// Snapshot of a request the builder would have dispatched.
#[derive(Debug, Clone, Serialize)]
pub struct FakeRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    pub options: Map<String, Value>,
}

impl From<TransportRequest> for FakeRequest {
    fn from(request: TransportRequest) -> Self {
        FakeRequest {
            method: request.method,
            url: request.url,
            body: request.body,
            options: request.options,
        }
    }
}

impl FakeRequest {
    /// Package the snapshot as a successful `ApiResponse` whose `data` is
    /// the inspection object (`method`, `url`, `body`, `options`).
    pub fn into_response(self) -> ApiResponse {
        log::debug!("fake request: {} {}", self.method, self.url);
        let data = serde_json::to_value(&self).unwrap_or(Value::Null);
        ApiResponse {
            status: 200,
            headers: Vec::new(),
            data,
        }
    }
}
