//! Public credential flows: registration, login, refresh.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::auth::scope::{Scope, ScopeSet};
use crate::auth::{self, email, password, TokenPair};
use crate::error::ApiError;
use crate::models::{Credentials, RefreshRequest, UserInput};
use crate::services;
use crate::state::AppState;

/// POST /auth/users - register a new account with the default auth group
pub async fn user_register(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> Result<impl IntoResponse, ApiError> {
    email::validate_email(&input.email).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let password_hash = password::hash_password(&input.password).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("An error occurred creating a user.")
    })?;

    let mut tx = state.pool.begin().await?;
    let user = services::users::create(&mut tx, &input, &password_hash).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/login - verify credentials, return an access/refresh pair.
///
/// An unknown email and a wrong password produce the identical response so
/// the two cases cannot be told apart.
pub async fn session_login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<TokenPair>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let user = services::users::find_by_email(&mut conn, &credentials.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Could not log in."))?;

    let verified = password::verify_password(&credentials.password, &user.password)
        .unwrap_or(false);
    if !verified {
        return Err(ApiError::unauthorized("Could not log in."));
    }

    let scopes = user.auth_group.scopes();
    let tokens = auth::issue_pair(&user.email, &scopes).map_err(|e| {
        tracing::error!("token issuance failed: {}", e);
        ApiError::internal_server_error("Could not issue tokens.")
    })?;
    Ok(Json(tokens))
}

/// POST /auth/refresh - rotate a refresh token into a fresh pair.
///
/// Scopes are taken from the presented token, not re-derived from the
/// database; a changed auth group only takes effect once the refresh token
/// expires.
pub async fn session_refresh(
    Json(input): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let claims = auth::decode_token(&input.refresh)
        .map_err(|_| ApiError::unauthorized("Could not validate credentials."))?;

    let scopes = ScopeSet::parse(&claims.scope);
    if !scopes.contains(Scope::Refresh) {
        return Err(ApiError::forbidden("Insufficient permissions."));
    }

    let permissions = scopes.without(Scope::Refresh);
    let tokens = auth::issue_pair(&claims.sub, &permissions).map_err(|e| {
        tracing::error!("token issuance failed: {}", e);
        ApiError::internal_server_error("Could not issue tokens.")
    })?;
    Ok(Json(tokens))
}
