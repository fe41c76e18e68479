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
use crate::models::LiftInput;
use crate::services;
use crate::state::AppState;

/// POST /api/lifts
pub async fn lift_create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<LiftInput>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::WriteLift])?;
    let mut tx = state.pool.begin().await?;
    require_user(&mut tx, &auth).await?;
    let lift = services::lifts::create(&mut tx, &input).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(lift)))
}

/// GET /api/lifts
pub async fn lift_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::ReadLift])?;
    let mut conn = state.pool.acquire().await?;
    require_user(&mut conn, &auth).await?;
    let lifts = services::lifts::list(&mut conn).await?;
    Ok(Json(lifts))
}

/// GET /api/lifts/:slug
pub async fn lift_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::ReadLift])?;
    let mut conn = state.pool.acquire().await?;
    require_user(&mut conn, &auth).await?;
    let lift = services::lifts::get_by_slug(&mut conn, &slug)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Lift '{slug}' not found.")))?;
    Ok(Json(lift))
}

/// PUT /api/lifts/:slug
pub async fn lift_update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
    Json(input): Json<LiftInput>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::WriteLift])?;
    let mut tx = state.pool.begin().await?;
    require_user(&mut tx, &auth).await?;
    let lift = services::lifts::update_by_slug(&mut tx, &slug, &input)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Lift '{slug}' not found.")))?;
    tx.commit().await?;
    Ok(Json(lift))
}

/// DELETE /api/lifts/:slug
pub async fn lift_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::DeleteLift])?;
    let mut tx = state.pool.begin().await?;
    require_user(&mut tx, &auth).await?;
    services::lifts::delete_by_slug(&mut tx, &slug).await?;
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
