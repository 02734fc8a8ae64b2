//! The fluent request builder.
//!
//! # Design
//! `Rapid` resolves a chain of calls into exactly one outgoing request per
//! terminal method: it computes the URL from configuration, route context,
//! and supplied segments, merges staged parameters with the configured
//! globals, hands the result to the injected transport, and clears the
//! staged state whether the call succeeded or failed.
//!
//! A builder is a single logical flow. Every method takes `&mut self`, so
//! the borrow checker enforces what the design requires anyway: callers
//! needing concurrent requests use separate builder instances (or clone the
//! `Config` into a new one per call).

use serde_json::{Map, Value};

use crate::config::{defaults_deep, Config, RouteContext, Routes};
use crate::debug::FakeRequest;
use crate::error::ApiError;
use crate::http::{ApiResponse, HttpTransport, Method, TransportRequest};
use crate::transport::UreqTransport;
use crate::url::{render_segments, sanitize_url, Segment};

/// How `update`, `save`, and `destroy` address the record they act on.
///
/// Replaces the arity-based dispatch of looser client libraries with an
/// explicit choice at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Put the configured primary key (when non-empty) and this id into the
    /// path: `<route>/<primary_key>/<id>/<suffix>`.
    Id(i64),
    /// No id in the path; the request body identifies the record:
    /// `<route>/<suffix>`.
    Body,
}

impl From<i64> for Target {
    fn from(id: i64) -> Self {
        Target::Id(id)
    }
}

/// Parameters and options staged for the next dispatched request.
#[derive(Debug, Clone, Default)]
struct RequestData {
    params: Map<String, Value>,
    options: Map<String, Value>,
}

/// Fluent REST request builder.
///
/// Configure once, then chain staging calls (`with_*`, context selectors)
/// into a terminal method (`get`, `create`, `find_by`, ...). Each terminal
/// call dispatches exactly one request and resets the staged state and
/// route context, so no staged data ever leaks into a later call — not even
/// after an error.
pub struct Rapid {
    config: Config,
    transport: Box<dyn HttpTransport>,
    current_route: RouteContext,
    request_data: RequestData,
}

impl Rapid {
    /// Build with the default `ureq`-backed transport.
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, Box::new(UreqTransport::default()))
    }

    /// Build with an injected transport.
    pub fn with_transport(mut config: Config, transport: Box<dyn HttpTransport>) -> Self {
        if config.routes.model.is_empty() {
            config.set_model_route();
        }
        if config.routes.collection.is_empty() {
            config.set_collection_route();
        }
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let current_route = config.default_route;
        Rapid {
            config,
            transport,
            current_route,
            request_data: RequestData::default(),
        }
    }

    // ------------------------------------------------------------------
    // URL building
    // ------------------------------------------------------------------

    /// Join the current-context route and `segments` into a sanitized
    /// relative URL. The route context resets to `Model` unconditionally,
    /// so every terminal call either selects a context or gets the default.
    pub fn make_url(&mut self, segments: impl IntoIterator<Item = Segment>) -> String {
        let mut parts = vec![self
            .config
            .routes
            .for_context(self.current_route)
            .to_string()];
        parts.extend(render_segments(segments));
        if self.config.trailing_slash {
            parts.push(String::new());
        }
        let url = sanitize_url(&parts.join("/"), self.config.trailing_slash);
        self.current_route = RouteContext::Model;
        url
    }

    // ------------------------------------------------------------------
    // Route context selectors
    // ------------------------------------------------------------------

    pub fn model(&mut self) -> &mut Self {
        self.current_route = RouteContext::Model;
        self
    }

    pub fn collection(&mut self) -> &mut Self {
        self.current_route = RouteContext::Collection;
        self
    }

    pub fn any(&mut self) -> &mut Self {
        self.current_route = RouteContext::Any;
        self
    }

    // ------------------------------------------------------------------
    // Request data staging
    // ------------------------------------------------------------------

    /// Deep-merge `{params, options}` over the staged state, incoming
    /// values winning on collision.
    pub fn with(&mut self, data: Value) -> &mut Self {
        let Value::Object(mut incoming) = data else {
            if !data.is_null() {
                log::warn!("with() expects an object with params/options keys; ignoring");
            }
            return self;
        };
        let mut params = into_object(incoming.remove("params"));
        defaults_deep(&mut params, &self.request_data.params);
        let mut options = into_object(incoming.remove("options"));
        defaults_deep(&mut options, &self.request_data.options);
        self.request_data = RequestData { params, options };
        self
    }

    /// Replace the staged parameters wholesale.
    pub fn with_params(&mut self, params: Value) -> &mut Self {
        self.request_data.params = into_object(Some(params));
        self
    }

    pub fn with_param(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.request_data.params.insert(key.into(), value);
        self
    }

    /// Replace the staged transport options wholesale.
    pub fn with_options(&mut self, options: Value) -> &mut Self {
        self.request_data.options = into_object(Some(options));
        self
    }

    pub fn with_option(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.request_data.options.insert(key.into(), value);
        self
    }

    // ------------------------------------------------------------------
    // Verb terminals
    // ------------------------------------------------------------------

    pub fn get(&mut self, segments: impl IntoIterator<Item = Segment>) -> Result<ApiResponse, ApiError> {
        self.build_request(Method::Get, segments)
    }

    pub fn post(&mut self, segments: impl IntoIterator<Item = Segment>) -> Result<ApiResponse, ApiError> {
        self.build_request(Method::Post, segments)
    }

    pub fn put(&mut self, segments: impl IntoIterator<Item = Segment>) -> Result<ApiResponse, ApiError> {
        self.build_request(Method::Put, segments)
    }

    pub fn patch(&mut self, segments: impl IntoIterator<Item = Segment>) -> Result<ApiResponse, ApiError> {
        self.build_request(Method::Patch, segments)
    }

    pub fn head(&mut self, segments: impl IntoIterator<Item = Segment>) -> Result<ApiResponse, ApiError> {
        self.build_request(Method::Head, segments)
    }

    pub fn delete(&mut self, segments: impl IntoIterator<Item = Segment>) -> Result<ApiResponse, ApiError> {
        self.build_request(Method::Delete, segments)
    }

    // ------------------------------------------------------------------
    // CRUD terminals
    // ------------------------------------------------------------------

    /// POST (or the configured create verb) to the model route plus the
    /// create suffix.
    pub fn create(&mut self, data: Value) -> Result<ApiResponse, ApiError> {
        self.stage_data(data);
        let method = self.config.methods.create;
        let segments = suffix_segment(&self.config.suffixes.create);
        let url = self.model().make_url(segments);
        self.request(method, url)
    }

    /// Update a record through the currently selected route context.
    pub fn update(&mut self, target: Target, data: Value) -> Result<ApiResponse, ApiError> {
        let method = self.config.methods.update;
        let suffix = self.config.suffixes.update.clone();
        self.update_or_destroy(method, suffix, target, data)
    }

    /// Alias for [`update`](Self::update).
    pub fn save(&mut self, target: Target, data: Value) -> Result<ApiResponse, ApiError> {
        self.update(target, data)
    }

    /// Delete a record through the currently selected route context.
    pub fn destroy(&mut self, target: Target) -> Result<ApiResponse, ApiError> {
        let method = self.config.methods.destroy;
        let suffix = self.config.suffixes.destroy.clone();
        self.update_or_destroy(method, suffix, target, Value::Null)
    }

    /// Primary-key lookup on the model route.
    pub fn find(&mut self, id: i64) -> Result<ApiResponse, ApiError> {
        let key = self.config.primary_key.clone();
        self.model().find_by(&key, Segment::id(id))
    }

    /// GET `<route>/<key>[/<value>]`; merged params travel as the query
    /// string. Works for primary-key and arbitrary field lookups alike.
    pub fn find_by(
        &mut self,
        key: &str,
        value: impl Into<Option<Segment>>,
    ) -> Result<ApiResponse, ApiError> {
        let mut segments = vec![Segment::key(key)];
        if let Some(value) = value.into() {
            segments.push(value);
        }
        let url = self.make_url(segments);
        self.request(Method::Get, url)
    }

    /// GET the collection route with no extra segments.
    pub fn all(&mut self) -> Result<ApiResponse, ApiError> {
        self.collection().get([])
    }

    // ------------------------------------------------------------------
    // Relationships
    // ------------------------------------------------------------------

    /// GET `<route>/<primary_key>/<relation>/<foreign_key...>`. A `Many`
    /// foreign key is spread as one segment per value.
    pub fn has_relationship(
        &mut self,
        relation: &str,
        primary_key: impl Into<Segment>,
        foreign_key: impl Into<Segment>,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.make_url([
            primary_key.into(),
            Segment::key(relation),
            foreign_key.into(),
        ]);
        self.request(Method::Get, url)
    }

    /// GET `<relation>[/<foreign_key_name>]/<foreign_key>/<context route>`,
    /// built through the `any` context with the previously selected route's
    /// path appended last.
    pub fn belongs_to(
        &mut self,
        relation: &str,
        foreign_key: impl Into<Segment>,
        foreign_key_name: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let context_route = self
            .config
            .routes
            .for_context(self.current_route)
            .to_string();
        let mut segments = vec![Segment::key(relation)];
        if let Some(name) = foreign_key_name {
            segments.push(Segment::key(name));
        }
        segments.push(foreign_key.into());
        segments.push(Segment::key(context_route));
        let url = self.any().make_url(segments);
        self.request(Method::Get, url)
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    fn build_request(
        &mut self,
        method: Method,
        segments: impl IntoIterator<Item = Segment>,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.make_url(segments);
        self.request(method, url)
    }

    fn update_or_destroy(
        &mut self,
        method: Method,
        suffix: String,
        target: Target,
        data: Value,
    ) -> Result<ApiResponse, ApiError> {
        self.stage_data(data);
        let mut segments = Vec::new();
        if let Target::Id(id) = target {
            if !self.config.primary_key.is_empty() {
                segments.push(Segment::key(self.config.primary_key.clone()));
            }
            segments.push(Segment::id(id));
        }
        segments.extend(suffix_segment(&suffix));
        let url = self.make_url(segments);
        self.request(method, url)
    }

    fn request(&mut self, method: Method, url: String) -> Result<ApiResponse, ApiError> {
        let full_url = sanitize_url(
            &format!("{}/{}", self.config.base_url, url),
            self.config.trailing_slash,
        );
        // Taking the staged state resets it exactly once, before any
        // outcome is surfaced, covering success and failure alike.
        let (body, options) = self.take_request_payload(method);
        let request = TransportRequest {
            method,
            url: full_url,
            body,
            options,
        };
        if self.config.debug {
            return Ok(FakeRequest::from(request).into_response());
        }
        self.transport.send(request)
    }

    /// Shape the staged data for the verb: body verbs carry the merged
    /// params as the JSON body, body-less verbs carry them in
    /// `options["params"]` for query serialization. Staged params win over
    /// `global_parameters` on collision.
    fn take_request_payload(&mut self, method: Method) -> (Option<Value>, Map<String, Value>) {
        let RequestData {
            mut params,
            mut options,
        } = std::mem::take(&mut self.request_data);
        defaults_deep(&mut params, &self.config.global_parameters);
        if method.has_body() {
            (Some(Value::Object(params)), options)
        } else {
            options.insert("params".to_string(), Value::Object(params));
            (None, options)
        }
    }

    /// Merge a terminal method's `data` argument beneath the staged params.
    /// Explicit staging wins over the convenience argument.
    fn stage_data(&mut self, data: Value) {
        match data {
            Value::Null => {}
            Value::Object(map) => defaults_deep(&mut self.request_data.params, &map),
            other => log::warn!("ignoring non-object request data: {other}"),
        }
    }

    // ------------------------------------------------------------------
    // Getters and setters
    // ------------------------------------------------------------------

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn routes(&self) -> &Routes {
        &self.config.routes
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn set_base_url(&mut self, url: &str) {
        self.config.base_url = sanitize_url(url, self.config.trailing_slash);
    }

    pub fn primary_key(&self) -> &str {
        &self.config.primary_key
    }

    pub fn set_primary_key(&mut self, key: impl Into<String>) {
        self.config.primary_key = key.into();
    }

    pub fn model_name(&self) -> &str {
        &self.config.model_name
    }

    /// Change the model name and re-derive both routes.
    pub fn set_model_name(&mut self, name: impl Into<String>) {
        self.config.model_name = name.into();
        self.config.set_model_route();
        self.config.set_collection_route();
    }

    pub fn route_delimiter(&self) -> &str {
        &self.config.route_delimiter
    }

    pub fn set_route_delimiter(&mut self, delimiter: impl Into<String>) {
        self.config.route_delimiter = delimiter.into();
        self.config.set_model_route();
        self.config.set_collection_route();
    }

    pub fn case_sensitive(&self) -> bool {
        self.config.case_sensitive
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.config.case_sensitive = case_sensitive;
        self.config.set_model_route();
        self.config.set_collection_route();
    }

    pub fn debug(&self) -> bool {
        self.config.debug
    }

    /// Debug mode is constructor-only; setting it later is a warned no-op.
    pub fn set_debug(&mut self, _enabled: bool) {
        log::warn!("debug mode must be enabled via Config.debug at construction");
    }
}

fn suffix_segment(suffix: &str) -> Vec<Segment> {
    if suffix.is_empty() {
        Vec::new()
    } else {
        vec![Segment::key(suffix)]
    }
}

fn into_object(value: Option<Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map,
        Some(other) if !other.is_null() => {
            log::warn!("expected an object, got {other}; ignoring");
            Map::new()
        }
        _ => Map::new(),
    }
}
