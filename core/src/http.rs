//! Transport-facing types for the dispatch boundary.
//!
//! # Design
//! The builder hands the transport a fully resolved `TransportRequest` as
//! plain data: final URL, verb, optional JSON body, and an opaque options
//! map. Anything the builder cannot type precisely (headers, query params,
//! transport tuning) travels inside `options` as JSON, keeping the trait
//! surface to a single method and letting tests swap in recording fakes.
//!
//! All fields use owned types so requests can be cloned into logs, probes,
//! and test fixtures without lifetime concerns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// HTTP verb for an outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Head,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Patch => "patch",
            Method::Head => "head",
            Method::Delete => "delete",
        }
    }

    /// Whether merged parameters ride in the request body (`post`, `put`,
    /// `patch`) rather than the query string.
    pub fn has_body(self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request, ready for a transport to execute.
///
/// Produced by the builder's terminal methods. `options["params"]` holds the
/// merged parameters for body-less verbs; `options["headers"]` may hold an
/// object of extra headers. Transports ignore option keys they do not
/// understand.
#[derive(Debug, Clone, Serialize)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    pub options: Map<String, Value>,
}

/// A completed HTTP exchange described as plain data.
///
/// `data` is the response body parsed as JSON when possible, the raw text as
/// a JSON string otherwise, and `Null` for empty bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub data: Value,
}

/// The HTTP transport the builder dispatches through.
///
/// Implementations own connection handling, TLS, redirects, and timeouts.
/// They must return `ApiError::Status` for completed exchanges with a
/// non-2xx status (carrying the response) and `ApiError::Transport` when the
/// exchange never completed. Cancellation, if any, is the transport's own.
pub trait HttpTransport {
    fn send(&self, request: TransportRequest) -> Result<ApiResponse, ApiError>;
}
