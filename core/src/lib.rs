//! Fluent REST request builder core.
//!
//! # Overview
//! `Rapid` turns a configured resource (`model_name`, `base_url`, naming
//! rules) plus a chain of fluent calls into exactly one HTTP request per
//! terminal method. URL derivation, parameter merging, and verb-dependent
//! body/query shaping live here; the HTTP round-trip itself goes through
//! the `HttpTransport` trait, with a blocking `ureq` implementation as the
//! default.
//!
//! # Design
//! - Configuration is an explicit struct merged over defaults with
//!   struct-update syntax; setters that affect naming re-derive the model
//!   and collection routes together.
//! - Staged request data is consumed exactly once per terminal call and is
//!   reset on success and failure alike.
//! - `debug: true` short-circuits dispatch into a fake-request snapshot so
//!   URL construction can be tested (and documented) without a network.
//! - A builder instance is a single logical flow; `&mut self` methods make
//!   concurrent reuse a compile error rather than a documented race.
//!
//! # Example
//! ```no_run
//! use rapid_core::{Config, Rapid, Segment, Target};
//! use serde_json::json;
//!
//! let mut users = Rapid::new(Config {
//!     model_name: "user".to_string(),
//!     primary_key: "id".to_string(),
//!     base_url: "https://example.test/api".to_string(),
//!     ..Config::default()
//! });
//!
//! let created = users.create(json!({"name": "Ada"}))?;
//! let page = users.with_param("page", json!(2)).all()?;
//! let one = users.find_by("email", Segment::key("ada@example.test"))?;
//! users.update(Target::Id(5), json!({"name": "Ada L."}))?;
//! # Ok::<(), rapid_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod debug;
pub mod error;
pub mod http;
pub mod transport;
pub mod url;

pub use client::{Rapid, Target};
pub use config::{Config, Methods, RouteContext, Routes, Suffixes};
pub use debug::FakeRequest;
pub use error::ApiError;
pub use http::{ApiResponse, HttpTransport, Method, TransportRequest};
pub use transport::UreqTransport;
pub use url::Segment;
