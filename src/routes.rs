use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    AppState, enrich,
    error::{AppError, AppResult},
    models::{FavoriteMovie, MovieRefs, NewUser, UserResponse},
};

pub async fn message() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello, world!" }))
}

pub async fn greet(Path(name): Path<String>) -> Json<serde_json::Value> {
    Json(json!({ "message": format!("Hello, {name}!") }))
}

pub async fn list_users(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.store.get_all_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewUser>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let user = state.store.add_user(name, req.profile_pic_url).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> AppResult<StatusCode> {
    if state.store.delete_user(user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("User not found".to_string()))
    }
}

pub async fn user_movies(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<FavoriteMovie>>> {
    if state.store.get_user(user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let favorites = state.store.get_user_movies(user_id).await?;
    Ok(Json(favorites.into_iter().map(|(m, link)| FavoriteMovie::from_parts(m, link)).collect()))
}

pub async fn add_favorites(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
    Json(refs): Json<MovieRefs>,
) -> AppResult<Response> {
    if state.store.get_user(user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let items = refs.into_vec();
    if items.is_empty() {
        return Err(AppError::Validation("request body required".to_string()));
    }

    if state.config.omdb_api_key.trim().is_empty() {
        return Err(AppError::Config("OMDB API key not configured".to_string()));
    }

    let report = enrich::add_movies_for_user(&state.store, &state.omdb, user_id, items).await;
    let status = if report.errors.is_empty() { StatusCode::OK } else { StatusCode::MULTI_STATUS };
    Ok((status, Json(report)).into_response())
}

pub async fn remove_favorites(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
    Json(refs): Json<MovieRefs>,
) -> AppResult<Response> {
    if state.store.get_user(user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let items = refs.into_vec();
    if items.is_empty() {
        return Err(AppError::Validation("request body required".to_string()));
    }

    let report = enrich::remove_movies_for_user(&state.store, user_id, items).await;
    let status = if report.errors.is_empty() { StatusCode::OK } else { StatusCode::MULTI_STATUS };
    Ok((status, Json(report)).into_response())
}
