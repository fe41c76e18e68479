#![allow(dead_code)]

use std::str::FromStr;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;

use girya::auth::{self, password};
use girya::models::AuthGroup;
use girya::router;
use girya::state::AppState;

/// In-memory store with the real schema. A single pooled connection keeps
/// the in-memory database alive for the whole test.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    girya::db::migrate(&pool).await.unwrap();
    pool
}

pub async fn test_app() -> (Router, SqlitePool) {
    let pool = test_pool().await;
    (router::app(AppState { pool: pool.clone() }), pool)
}

pub async fn seed_user(pool: &SqlitePool, email: &str, plaintext: &str, group: AuthGroup) -> i64 {
    let hash = password::hash_password(plaintext).unwrap();
    sqlx::query_scalar(
        "INSERT INTO user (email, first_name, last_name, password, auth_group) \
         VALUES (?, 'Test', 'User', ?, ?) RETURNING id",
    )
    .bind(email)
    .bind(hash)
    .bind(group)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Access token for a subject holding the given group's scopes.
pub fn access_token(email: &str, group: AuthGroup) -> String {
    auth::issue_pair(email, &group.scopes()).unwrap().access
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
