use axum::{middleware::from_fn, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes (token acquisition)
        .merge(auth_public_routes())
        // Protected API
        .merge(api_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use axum::routing::post;
    use public::auth;

    Router::new()
        .route("/auth/users", post(auth::user_register))
        .route("/auth/login", post(auth::session_login))
        .route("/auth/refresh", post(auth::session_refresh))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(lift_routes())
        .merge(split_routes())
        .merge(workout_routes())
        .merge(set_routes())
        .layer(from_fn(jwt_auth_middleware))
}

fn lift_routes() -> Router<AppState> {
    use protected::lifts;

    Router::new()
        .route("/api/lifts", get(lifts::lift_list).post(lifts::lift_create))
        .route(
            "/api/lifts/:slug",
            get(lifts::lift_get)
                .put(lifts::lift_update)
                .delete(lifts::lift_delete),
        )
}

fn split_routes() -> Router<AppState> {
    use protected::splits;

    Router::new()
        .route(
            "/api/splits",
            get(splits::split_list).post(splits::split_create),
        )
        .route(
            "/api/splits/:slug",
            get(splits::split_get)
                .put(splits::split_update)
                .delete(splits::split_delete),
        )
}

fn workout_routes() -> Router<AppState> {
    use protected::{sets, workouts};

    Router::new()
        .route(
            "/api/workouts",
            get(workouts::workout_list).post(workouts::workout_create),
        )
        .route(
            "/api/workouts/:slug",
            get(workouts::workout_get).delete(workouts::workout_delete),
        )
        .route("/api/workouts/:slug/sets", get(sets::workout_sets_list))
}

fn set_routes() -> Router<AppState> {
    use protected::sets;

    Router::new()
        .route("/api/sets", axum::routing::post(sets::set_create))
        .route(
            "/api/sets/:id",
            get(sets::set_get)
                .put(sets::set_update)
                .delete(sets::set_delete),
        )
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Girya",
            "version": version,
            "description": "Workout tracking REST backend",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/users, /auth/login, /auth/refresh (public - token acquisition)",
                "lifts": "/api/lifts[/:slug] (protected)",
                "splits": "/api/splits[/:slug] (protected)",
                "workouts": "/api/workouts[/:slug] (protected, owner-scoped)",
                "sets": "/api/sets[/:id], /api/workouts/:slug/sets (protected, owner-scoped)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match db::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
