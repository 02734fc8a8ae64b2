//! Default live transport over `ureq`.
//!
//! # Design
//! Status handling is disabled on the agent so 4xx/5xx come back as data,
//! then classified here: 2xx responses are `Ok`, everything else is
//! `ApiError::Status` carrying the full response. The builder upstream
//! never looks at status codes.
//!
//! Option keys understood: `params` (object, sent as query pairs) and
//! `headers` (object, sent as request headers). Values are coerced to
//! strings best-effort; unknown keys are ignored.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{ApiResponse, HttpTransport, Method, TransportRequest};

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        UreqTransport { agent }
    }
}

impl HttpTransport for UreqTransport {
    fn send(&self, request: TransportRequest) -> Result<ApiResponse, ApiError> {
        let query = object_pairs(request.options.get("params"));
        let headers = object_pairs(request.options.get("headers"));

        let result = match request.method {
            Method::Get | Method::Head | Method::Delete => {
                let mut call = match request.method {
                    Method::Get => self.agent.get(&request.url),
                    Method::Head => self.agent.head(&request.url),
                    _ => self.agent.delete(&request.url),
                };
                for (key, value) in &query {
                    call = call.query(key.as_str(), value.as_str());
                }
                for (key, value) in &headers {
                    call = call.header(key.as_str(), value.as_str());
                }
                call.call()
            }
            Method::Post | Method::Put | Method::Patch => {
                let mut call = match request.method {
                    Method::Post => self.agent.post(&request.url),
                    Method::Put => self.agent.put(&request.url),
                    _ => self.agent.patch(&request.url),
                };
                for (key, value) in &query {
                    call = call.query(key.as_str(), value.as_str());
                }
                for (key, value) in &headers {
                    call = call.header(key.as_str(), value.as_str());
                }
                let body = match &request.body {
                    Some(value) => serde_json::to_string(value)
                        .map_err(|e| ApiError::Serialization(e.to_string()))?,
                    None => String::new(),
                };
                call.content_type("application/json").send(body.as_bytes())
            }
        };

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let text = response.body_mut().read_to_string().unwrap_or_default();
        let data = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        let response = ApiResponse {
            status,
            headers,
            data,
        };
        if !(200..300).contains(&status) {
            return Err(ApiError::Status(response));
        }
        Ok(response)
    }
}

/// Flatten an options sub-object into string pairs, skipping nulls.
fn object_pairs(value: Option<&Value>) -> Vec<(String, String)> {
    let Some(Value::Object(map)) = value else {
        return Vec::new();
    };
    map.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), coerce(value)))
        .collect()
}

fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        // Nested structures are serialized compactly; the builder documents
        // this as best-effort rather than validating.
        other => other.to_string(),
    }
}
