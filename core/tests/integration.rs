//! Full CRUD lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every terminal
//! builder method over real HTTP through the default ureq transport.
//! Validates URL construction, verb selection, query injection, and error
//! propagation end-to-end against the actual server.

use rapid_core::{ApiError, Config, Rapid, Segment, Target};
use serde_json::json;

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn crud_lifecycle() {
    let addr = start_server();

    let mut api = Rapid::new(Config {
        model_name: "user".to_string(),
        primary_key: "id".to_string(),
        base_url: format!("http://{addr}"),
        ..Config::default()
    });

    // Step 1: list — should be empty.
    let response = api.all().unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.data, json!([]));

    // Step 2: create.
    let response = api
        .create(json!({"name": "Ada", "email": "ada@example.test"}))
        .unwrap();
    assert_eq!(response.status, 201);
    assert_eq!(response.data["name"], "Ada");
    let id = response.data["id"].as_i64().unwrap();

    // Step 3: primary-key lookup.
    let response = api.find(id).unwrap();
    assert_eq!(response.data["email"], "ada@example.test");

    // Step 4: arbitrary field lookup.
    let response = api
        .find_by("email", Segment::key("ada@example.test"))
        .unwrap();
    assert_eq!(response.data["id"], json!(id));

    // Step 5: partial update through the update suffix.
    let response = api
        .update(Target::Id(id), json!({"name": "Ada Lovelace"}))
        .unwrap();
    assert_eq!(response.data["name"], "Ada Lovelace");
    assert_eq!(response.data["email"], "ada@example.test");

    // Step 6: second record, then a limited list to observe staged params
    // serialized into the query string.
    api.create(json!({"name": "Grace", "email": "grace@example.test"}))
        .unwrap();
    let response = api.with_param("limit", json!(1)).all().unwrap();
    assert_eq!(response.data.as_array().unwrap().len(), 1);
    let response = api.all().unwrap();
    assert_eq!(response.data.as_array().unwrap().len(), 2);

    // Step 7: staged data from before an error never leaks into later
    // calls: the limit staged before this failing lookup must not
    // constrain the list that follows.
    api.with_param("limit", json!(1));
    let _ = api.find(999).unwrap_err();
    let response = api.all().unwrap();
    assert_eq!(response.data.as_array().unwrap().len(), 2);

    // Step 8: destroy.
    let response = api.destroy(Target::Id(id)).unwrap();
    assert_eq!(response.status, 204);
    assert_eq!(response.data, json!(null));

    // Step 9: lookups after destroy reject with the 404 response attached.
    let err = api.find(id).unwrap_err();
    match err {
        ApiError::Status(response) => assert_eq!(response.status, 404),
        other => panic!("expected status error, got {other}"),
    }

    // Step 10: destroy again — same rejection, and the builder stays usable.
    let err = api.destroy(Target::Id(id)).unwrap_err();
    assert_eq!(err.status(), Some(404));
    let response = api.all().unwrap();
    assert_eq!(response.data.as_array().unwrap().len(), 1);
    assert_eq!(response.data[0]["name"], "Grace");
}
