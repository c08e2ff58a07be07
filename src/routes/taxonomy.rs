use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::dto::taxonomy_dto::{CreateDirectionRequest, CreateLanguageRequest};
use crate::AppState;

#[axum::debug_handler]
pub async fn list_directions(State(state): State<AppState>) -> crate::error::Result<Response> {
    let directions = state.user_service.list_directions().await?;
    Ok(Json(directions).into_response())
}

#[axum::debug_handler]
pub async fn create_direction(
    State(state): State<AppState>,
    Json(req): Json<CreateDirectionRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let direction = state.user_service.create_direction(&req.name).await?;
    Ok((StatusCode::CREATED, Json(direction)).into_response())
}

#[axum::debug_handler]
pub async fn delete_direction(
    State(state): State<AppState>,
    Path(direction_id): Path<i32>,
) -> crate::error::Result<Response> {
    state.user_service.delete_direction(direction_id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

#[axum::debug_handler]
pub async fn list_languages(State(state): State<AppState>) -> crate::error::Result<Response> {
    let languages = state.user_service.list_languages().await?;
    Ok(Json(languages).into_response())
}

#[axum::debug_handler]
pub async fn create_language(
    State(state): State<AppState>,
    Json(req): Json<CreateLanguageRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let language = state.user_service.create_language(&req.name).await?;
    Ok((StatusCode::CREATED, Json(language)).into_response())
}

#[axum::debug_handler]
pub async fn delete_language(
    State(state): State<AppState>,
    Path(language_id): Path<i32>,
) -> crate::error::Result<Response> {
    state.user_service.delete_language(language_id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
