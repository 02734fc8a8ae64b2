//! Error types for request dispatch.
//!
//! # Design
//! Non-success statuses get a dedicated variant carrying the full
//! `ApiResponse` so callers can inspect status, headers, and parsed body —
//! the builder never interprets status codes on their behalf. Failures
//! below HTTP (DNS, refused connections, broken pipes) land in `Transport`
//! with the underlying message.

use std::fmt;

use crate::http::ApiResponse;

/// Errors surfaced by terminal builder methods.
#[derive(Debug)]
pub enum ApiError {
    /// The transport completed the exchange but the status was not 2xx.
    /// Carries the full response for the caller to interpret.
    Status(ApiResponse),

    /// The request never completed: network or I/O failure below HTTP.
    Transport(String),

    /// The request body could not be encoded as JSON.
    Serialization(String),
}

impl ApiError {
    /// Status code of the failed response, if the exchange completed.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status(response) => Some(response.status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status(response) => {
                write!(f, "HTTP {}: {}", response.status, response.data)
            }
            ApiError::Transport(msg) => write!(f, "transport failed: {msg}"),
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
