use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::auth::scope::Scope;
use crate::error::ApiError;
use crate::handlers::require_user;
use crate::middleware::AuthUser;
use crate::models::WorkoutInput;
use crate::services;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WorkoutQuery {
    /// Exact-equality timestamp filter, not a range.
    pub at: Option<DateTime<Utc>>,
}

/// POST /api/workouts
pub async fn workout_create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<WorkoutInput>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::WriteWorkout])?;
    let mut tx = state.pool.begin().await?;
    let user = require_user(&mut tx, &auth).await?;
    let workout = services::workouts::create(&mut tx, &input, user.id).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

/// GET /api/workouts?at=... - always scoped to the requesting user
pub async fn workout_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<WorkoutQuery>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::ReadWorkout])?;
    let mut conn = state.pool.acquire().await?;
    let user = require_user(&mut conn, &auth).await?;
    let workouts = services::workouts::list(&mut conn, user.id, query.at).await?;
    Ok(Json(workouts))
}

/// GET /api/workouts/:slug
pub async fn workout_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::ReadWorkout])?;
    let mut conn = state.pool.acquire().await?;
    let user = require_user(&mut conn, &auth).await?;
    let workout = services::workouts::get_by_slug(&mut conn, &slug, Some(user.id))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No workout '{slug}'")))?;
    Ok(Json(workout))
}

/// DELETE /api/workouts/:slug
pub async fn workout_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Scope::DeleteWorkout])?;
    let mut tx = state.pool.begin().await?;
    let user = require_user(&mut tx, &auth).await?;
    services::workouts::delete_by_slug(&mut tx, &slug, Some(user.id)).await?;
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
