use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    Extension,
};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, MeResponse, MessageResponse, RegisterRequest};
use crate::middleware::auth::Claims;
use crate::utils::token::create_access_token;
use crate::AppState;

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let user = state.user_service.register(req).await?;
    tracing::info!(user_id = user.id, "New user registered");
    Ok(Json(MessageResponse {
        message: "Registration is successful!".to_string(),
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let user = state
        .user_service
        .authenticate(&req.email, &req.password)
        .await?;

    let config = crate::config::get_config();
    let access_token =
        create_access_token(user.id, config.jwt_secret.as_bytes(), config.token_ttl_days)?;

    Ok(Json(LoginResponse {
        ok: true,
        access_token,
        message: "Authorization is successful!".to_string(),
    })
    .into_response())
}

/// Tokens are stateless; the client just drops its copy.
#[axum::debug_handler]
pub async fn logout() -> crate::error::Result<Response> {
    Ok(Json(MessageResponse {
        message: "Logout is successful!".to_string(),
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let user = state.user_service.get_by_id(user_id).await?;
    let directions = state.user_service.directions_of(user_id).await?;
    let languages = state.user_service.languages_of(user_id).await?;

    Ok(Json(MeResponse {
        id: user.id,
        email: user.email,
        name: user.name,
        directions,
        languages,
    })
    .into_response())
}
