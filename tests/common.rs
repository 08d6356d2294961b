#![allow(dead_code)]

use axum::{
    body::{self, Body},
    http::{header::{AUTHORIZATION, CONTENT_TYPE}, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;
use tweethub::{db, AppState};

/// A fresh app over its own in-memory database.
pub async fn setup() -> (Router, SqlitePool) {
    // one connection, or every checkout would see a different empty database
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    db::init_schema(&db_pool).await.expect("create schema");

    (tweethub::app(AppState { db_pool: db_pool.clone() }), db_pool)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("build request"))
        .await
        .expect("router is infallible");

    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub async fn signup(app: &Router, firstname: &str, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/users/signup",
        None,
        Some(json!({ "firstname": firstname, "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["token"].as_str().expect("token in signup response").to_owned()
}

pub async fn post_tweet(app: &Router, token: &str, content: &str) -> (StatusCode, Value) {
    send(app, Method::POST, "/tweets/new", Some(token), Some(json!({ "content": content }))).await
}

pub fn error_of(body: &Value) -> &str {
    assert_eq!(body["result"], json!(false), "{body}");
    body["error"].as_str().unwrap_or_default()
}
