// Registration, login, refresh, and token enforcement over the HTTP surface.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use girya::auth::scope::{Scope, ScopeSet};
use girya::auth::{self, decode_token};
use girya::models::AuthGroup;

#[tokio::test]
async fn register_creates_common_user_without_leaking_password() {
    let (app, _pool) = common::test_app().await;

    let (status, body) = common::send(
        &app,
        common::json_request(
            "POST",
            "/auth/users",
            None,
            Some(json!({
                "email": "lifter@example.com",
                "first_name": "Kira",
                "last_name": "Ivanova",
                "password": "hunter2hunter2"
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "lifter@example.com");
    assert_eq!(body["auth_group"], "common");
    assert!(body["id"].is_i64());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn register_duplicate_email_conflicts() {
    let (app, pool) = common::test_app().await;
    common::seed_user(&pool, "taken@example.com", "pw", AuthGroup::Common).await;

    let (status, body) = common::send(
        &app,
        common::json_request(
            "POST",
            "/auth/users",
            None,
            Some(json!({
                "email": "taken@example.com",
                "first_name": "A",
                "last_name": "B",
                "password": "irrelevant"
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let (app, _pool) = common::test_app().await;

    for bad in ["a..b@example.com", "noatsign.example.com", "a b@example.com"] {
        let (status, _body) = common::send(
            &app,
            common::json_request(
                "POST",
                "/auth/users",
                None,
                Some(json!({
                    "email": bad,
                    "first_name": "A",
                    "last_name": "B",
                    "password": "irrelevant"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "email {bad:?}");
    }
}

#[tokio::test]
async fn login_returns_decodable_token_pair() {
    let (app, pool) = common::test_app().await;
    common::seed_user(&pool, "lifter@example.com", "hunter2", AuthGroup::Common).await;

    let (status, body) = common::send(
        &app,
        common::json_request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "lifter@example.com", "password": "hunter2" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let access = decode_token(body["access"].as_str().unwrap()).unwrap();
    assert_eq!(access.sub, "lifter@example.com");
    assert_eq!(ScopeSet::parse(&access.scope), AuthGroup::Common.scopes());

    let refresh = decode_token(body["refresh"].as_str().unwrap()).unwrap();
    assert!(ScopeSet::parse(&refresh.scope).contains(Scope::Refresh));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (app, pool) = common::test_app().await;
    common::seed_user(&pool, "lifter@example.com", "hunter2", AuthGroup::Common).await;

    let (wrong_pw_status, wrong_pw_body) = common::send(
        &app,
        common::json_request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "lifter@example.com", "password": "nope" })),
        ),
    )
    .await;
    let (no_user_status, no_user_body) = common::send(
        &app,
        common::json_request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "ghost@example.com", "password": "nope" })),
        ),
    )
    .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(no_user_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw_body, no_user_body);
}

#[tokio::test]
async fn refresh_rotates_the_pair_and_preserves_scopes() {
    let (app, _pool) = common::test_app().await;
    let pair = auth::issue_pair("lifter@example.com", &AuthGroup::Admin.scopes()).unwrap();

    let (status, body) = common::send(
        &app,
        common::json_request(
            "POST",
            "/auth/refresh",
            None,
            Some(json!({ "refresh": pair.refresh })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let access = decode_token(body["access"].as_str().unwrap()).unwrap();
    assert_eq!(access.sub, "lifter@example.com");
    // The marker never leaks into the new access token.
    assert_eq!(ScopeSet::parse(&access.scope), AuthGroup::Admin.scopes());
    let refresh = decode_token(body["refresh"].as_str().unwrap()).unwrap();
    assert!(ScopeSet::parse(&refresh.scope).contains(Scope::Refresh));
}

#[tokio::test]
async fn refresh_rejects_an_access_token() {
    let (app, _pool) = common::test_app().await;
    let pair = auth::issue_pair("lifter@example.com", &AuthGroup::Common.scopes()).unwrap();

    let (status, _body) = common::send(
        &app,
        common::json_request(
            "POST",
            "/auth/refresh",
            None,
            Some(json!({ "refresh": pair.access })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn refresh_rejects_garbage() {
    let (app, _pool) = common::test_app().await;

    let (status, _body) = common::send(
        &app,
        common::json_request(
            "POST",
            "/auth/refresh",
            None,
            Some(json!({ "refresh": "not.a.token" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let (app, _pool) = common::test_app().await;

    let (status, _body) =
        common::send(&app, common::json_request("GET", "/api/lifts", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn common_scopes_cannot_write_lifts() {
    let (app, pool) = common::test_app().await;
    common::seed_user(&pool, "lifter@example.com", "pw", AuthGroup::Common).await;
    let token = common::access_token("lifter@example.com", AuthGroup::Common);

    let (status, body) = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/lifts",
            Some(&token),
            Some(json!({ "name": "Bench Press", "slug": "bench-press" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Insufficient permissions.");
}

#[tokio::test]
async fn token_for_a_deleted_user_is_unauthorized() {
    let (app, _pool) = common::test_app().await;
    // Valid signature, but no such user in the store.
    let token = common::access_token("ghost@example.com", AuthGroup::Admin);

    let (status, _body) = common::send(
        &app,
        common::json_request("GET", "/api/lifts", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
