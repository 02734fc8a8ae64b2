//! Verify URL construction and dispatch shaping against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each vector describes a builder configuration, staged data, and one
//! terminal operation, plus the request the builder is expected to compute.
//! The builder runs in debug mode, so the fake-request snapshot carries the
//! method/url/body/params without any network involvement.

use rapid_core::{Config, Rapid, Segment, Target};
use serde_json::Value;

fn build_config(spec: &Value) -> Config {
    let mut config = Config {
        debug: true,
        ..Config::default()
    };
    if let Some(v) = spec.get("model_name").and_then(Value::as_str) {
        config.model_name = v.to_string();
    }
    if let Some(v) = spec.get("primary_key").and_then(Value::as_str) {
        config.primary_key = v.to_string();
    }
    if let Some(v) = spec.get("base_url").and_then(Value::as_str) {
        config.base_url = v.to_string();
    }
    if let Some(v) = spec.get("route_delimiter").and_then(Value::as_str) {
        config.route_delimiter = v.to_string();
    }
    if let Some(v) = spec.get("trailing_slash").and_then(Value::as_bool) {
        config.trailing_slash = v;
    }
    if let Some(v) = spec.get("case_sensitive").and_then(Value::as_bool) {
        config.case_sensitive = v;
    }
    if let Some(v) = spec.get("global_parameters").and_then(Value::as_object) {
        config.global_parameters = v.clone();
    }
    if let Some(suffixes) = spec.get("suffixes").and_then(Value::as_object) {
        if let Some(v) = suffixes.get("create").and_then(Value::as_str) {
            config.suffixes.create = v.to_string();
        }
        if let Some(v) = suffixes.get("update").and_then(Value::as_str) {
            config.suffixes.update = v.to_string();
        }
        if let Some(v) = suffixes.get("destroy").and_then(Value::as_str) {
            config.suffixes.destroy = v.to_string();
        }
    }
    config
}

fn run_operation(api: &mut Rapid, op: &Value) -> rapid_core::ApiResponse {
    let result = match op["op"].as_str().unwrap() {
        "create" => api.create(op["data"].clone()),
        "update" => match op.get("id").and_then(Value::as_i64) {
            Some(id) => api.update(Target::Id(id), op["data"].clone()),
            None => api.update(Target::Body, op["data"].clone()),
        },
        "destroy" => match op.get("id").and_then(Value::as_i64) {
            Some(id) => api.destroy(Target::Id(id)),
            None => api.destroy(Target::Body),
        },
        "find" => api.find(op["id"].as_i64().unwrap()),
        "find_by" => api.find_by(
            op["key"].as_str().unwrap(),
            op.get("value").filter(|v| !v.is_null()).map(Segment::from),
        ),
        "all" => api.all(),
        "get" => api.get(op["segments"].as_array().unwrap().iter().map(Segment::from)),
        "has_relationship" => api.has_relationship(
            op["relation"].as_str().unwrap(),
            Segment::from(&op["primary_key"]),
            Segment::from(&op["foreign_key"]),
        ),
        "belongs_to" => api.belongs_to(
            op["relation"].as_str().unwrap(),
            Segment::from(&op["foreign_key"]),
            op.get("foreign_key_name").and_then(Value::as_str),
        ),
        other => panic!("unknown op: {other}"),
    };
    result.expect("debug-mode dispatch cannot fail")
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut api = Rapid::new(build_config(&case["config"]));

        if let Some(params) = case.get("staged_params") {
            api.with_params(params.clone());
        }
        if case.get("context").and_then(Value::as_str) == Some("collection") {
            api.collection();
        }

        let response = run_operation(&mut api, &case["operation"]);
        let expected = &case["expected"];

        assert_eq!(response.data["method"], expected["method"], "{name}: method");
        assert_eq!(response.data["url"], expected["url"], "{name}: url");
        if let Some(body) = expected.get("body") {
            assert_eq!(&response.data["body"], body, "{name}: body");
        }
        if let Some(params) = expected.get("params") {
            assert_eq!(&response.data["options"]["params"], params, "{name}: params");
        }
    }
}
