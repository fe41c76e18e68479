use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::auth::scope::Scope;
use crate::error::ApiError;
use crate::handlers::require_user;
use crate::middleware::AuthUser;
use crate::models::SplitInput;
use crate::services;
use crate::state::AppState;

/// POST /api/splits
pub async fn split_create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<SplitInput>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::WriteSplit])?;
    let mut tx = state.pool.begin().await?;
    require_user(&mut tx, &auth).await?;
    let split = services::splits::create(&mut tx, &input).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(split)))
}

/// GET /api/splits
pub async fn split_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::ReadSplit])?;
    let mut conn = state.pool.acquire().await?;
    require_user(&mut conn, &auth).await?;
    let splits = services::splits::list(&mut conn).await?;
    Ok(Json(splits))
}

/// GET /api/splits/:slug
pub async fn split_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::ReadSplit])?;
    let mut conn = state.pool.acquire().await?;
    require_user(&mut conn, &auth).await?;
    let split = services::splits::get_by_slug(&mut conn, &slug)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No split '{slug}'")))?;
    Ok(Json(split))
}

/// PUT /api/splits/:slug
pub async fn split_update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
    Json(input): Json<SplitInput>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::WriteSplit])?;
    let mut tx = state.pool.begin().await?;
    require_user(&mut tx, &auth).await?;
    let split = services::splits::update_by_slug(&mut tx, &slug, &input)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No split '{slug}'")))?;
    tx.commit().await?;
    Ok(Json(split))
}

/// DELETE /api/splits/:slug
pub async fn split_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::DeleteSplit])?;
    let mut tx = state.pool.begin().await?;
    require_user(&mut tx, &auth).await?;
    services::splits::delete_by_slug(&mut tx, &slug).await?;
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
