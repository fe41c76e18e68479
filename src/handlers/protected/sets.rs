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
use crate::models::{SetInput, SetUpdateInput};
use crate::services;
use crate::state::AppState;

fn check_reps(reps: i64) -> Result<(), ApiError> {
    if reps <= 0 {
        return Err(ApiError::bad_request("Reps must be greater than zero."));
    }
    Ok(())
}

/// POST /api/sets - ownership of the target workout is checked at insert
/// time via the workout join
pub async fn set_create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<SetInput>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::WriteSet])?;
    check_reps(input.reps)?;
    let mut tx = state.pool.begin().await?;
    let user = require_user(&mut tx, &auth).await?;
    let set = services::sets::create(&mut tx, &input, Some(user.id)).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(set)))
}

/// GET /api/sets/:id
pub async fn set_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(set_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::ReadSet])?;
    let mut conn = state.pool.acquire().await?;
    let user = require_user(&mut conn, &auth).await?;
    let set = services::sets::get_by_id(&mut conn, set_id, Some(user.id))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No set '{set_id}'")))?;
    Ok(Json(set))
}

/// PUT /api/sets/:id
pub async fn set_update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(set_id): Path<i64>,
    Json(input): Json<SetUpdateInput>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::WriteSet])?;
    check_reps(input.reps)?;
    let mut tx = state.pool.begin().await?;
    let user = require_user(&mut tx, &auth).await?;
    let set = services::sets::update_by_id(&mut tx, set_id, &input, Some(user.id)).await?;
    tx.commit().await?;
    Ok(Json(set))
}

/// DELETE /api/sets/:id
pub async fn set_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(set_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::DeleteSet])?;
    let mut tx = state.pool.begin().await?;
    let user = require_user(&mut tx, &auth).await?;
    services::sets::delete_by_id(&mut tx, set_id, Some(user.id)).await?;
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/workouts/:slug/sets
pub async fn workout_sets_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::ReadSet])?;
    let mut conn = state.pool.acquire().await?;
    let user = require_user(&mut conn, &auth).await?;
    let sets = services::sets::list_by_workout(&mut conn, &slug, Some(user.id)).await?;
    Ok(Json(sets))
}
