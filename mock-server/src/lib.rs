//! Mock REST server speaking the URL grammar the request builder emits.
//!
//! Routes mirror a builder configured with `model_name: "user"` and
//! `primary_key: "id"`: action suffixes (`/create`, `/update`, `/destroy`)
//! ride on the model route, lookups use `/user/{key}/{value}`, and the
//! collection route lists everything. The list endpoint honors a `limit`
//! query parameter so integration tests can observe query-string injection.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Default)]
pub struct Store {
    users: HashMap<i64, User>,
    next_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/users", get(list_users))
        .route("/user/create", post(create_user))
        .route("/user/{key}/{value}", get(find_user))
        .route("/user/id/{id}/update", post(update_user))
        .route("/user/id/{id}/destroy", post(destroy_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(
    State(db): State<Db>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<User>> {
    let store = db.read().await;
    let mut users: Vec<User> = store.users.values().cloned().collect();
    users.sort_by_key(|user| user.id);
    if let Some(limit) = query.get("limit").and_then(|raw| raw.parse().ok()) {
        users.truncate(limit);
    }
    Json(users)
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> (StatusCode, Json<User>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let user = User {
        id: store.next_id,
        name: input.name,
        email: input.email,
    };
    store.users.insert(user.id, user.clone());
    (StatusCode::CREATED, Json(user))
}

async fn find_user(
    State(db): State<Db>,
    Path((key, value)): Path<(String, String)>,
) -> Result<Json<User>, StatusCode> {
    let store = db.read().await;
    let found = match key.as_str() {
        "id" => {
            let id: i64 = value.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
            store.users.get(&id).cloned()
        }
        "email" => store.users.values().find(|user| user.email == value).cloned(),
        _ => return Err(StatusCode::BAD_REQUEST),
    };
    found.map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, StatusCode> {
    let mut store = db.write().await;
    let user = store.users.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(email) = input.email {
        user.email = email;
    }
    Ok(Json(user.clone()))
}

async fn destroy_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .users
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
