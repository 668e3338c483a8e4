//! Watchlog HTTP routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    error::{ApiError, ApiResult},
    models::{LoginCredentials, NewMovie, NewSession, RegisterRequest, UserLookup},
    state::AppState,
};

/// Create the router for the Watchlog service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/user/register", post(register))
        .route("/user/login", post(login))
        .route("/session/new", post(new_session))
        .route("/session/users", post(find_user))
        .route("/session/logout/:token", delete(logout))
        .route("/session/:token", get(get_session))
        .route("/movies/:user_id", get(list_movies))
        .route("/movie", post(add_movie))
        .route("/movie/:user_id/:movie_id", get(get_movie))
        .route("/movie/delete/:user_id/:movie_id", delete(delete_movie))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "watchlog"
    }))
}

/// User registration endpoint
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let user = state.auth_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<LoginCredentials>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let user = state.auth_service.login(payload).await?;
    Ok(Json(user))
}

/// Look up an account by username
pub async fn find_user(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<UserLookup>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let user = state.auth_service.find_user(&payload.username).await?;
    Ok(Json(user))
}

pub async fn new_session(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<NewSession>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let session = state.auth_service.new_session(payload).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn get_session(
    State(state): State<AppState>,
    WithRejection(Path(token), _): WithRejection<Path<String>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let session = state.auth_service.get_session(&token).await?;
    Ok(Json(session))
}

/// Logout endpoint
pub async fn logout(
    State(state): State<AppState>,
    WithRejection(Path(token), _): WithRejection<Path<String>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    state.auth_service.end_session(&token).await?;
    Ok(Json(json!({"message": "Logged out successfully"})))
}

pub async fn list_movies(
    State(state): State<AppState>,
    WithRejection(Path(user_id), _): WithRejection<Path<i64>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let movies = state.activity_service.list_movies(user_id).await?;
    Ok(Json(movies))
}

pub async fn get_movie(
    State(state): State<AppState>,
    WithRejection(Path((user_id, movie_id)), _): WithRejection<Path<(i64, i64)>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let movie = state.activity_service.get_movie(user_id, movie_id).await?;
    Ok(Json(movie))
}

pub async fn add_movie(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<NewMovie>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let movie = state.activity_service.add_movie(payload).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    WithRejection(Path((user_id, movie_id)), _): WithRejection<Path<(i64, i64)>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    state
        .activity_service
        .delete_movie(user_id, movie_id)
        .await?;
    Ok(Json(json!({"message": "Record deleted"})))
}
