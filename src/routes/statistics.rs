use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    Extension,
};

use crate::dto::statistics_dto::TopQuestionsResponse;
use crate::middleware::auth::Claims;
use crate::AppState;

#[axum::debug_handler]
pub async fn interview_statistics(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let stats = state.statistics_service.interview_statistics(user_id).await?;
    Ok(Json(stats).into_response())
}

#[axum::debug_handler]
pub async fn questions_statistics(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let stats = state.statistics_service.questions_statistics(user_id).await?;
    Ok(Json(stats).into_response())
}

#[axum::debug_handler]
pub async fn top_successful_questions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let questions = state
        .statistics_service
        .top_successful_questions(user_id)
        .await?;
    Ok(Json(TopQuestionsResponse { questions }).into_response())
}

#[axum::debug_handler]
pub async fn top_unsuccessful_questions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let questions = state
        .statistics_service
        .top_unsuccessful_questions(user_id)
        .await?;
    Ok(Json(TopQuestionsResponse { questions }).into_response())
}
