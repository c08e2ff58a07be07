use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
    Extension,
};

use crate::dto::history_dto::{
    HistoryAnswerItem, HistoryDetailResponse, HistoryItem, HistoryListResponse,
};
use crate::error::Error;
use crate::middleware::auth::Claims;
use crate::services::history_service::score_percent;
use crate::AppState;

#[axum::debug_handler]
pub async fn get_history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let interviews = state.history_service.list_completed(user_id).await?;

    let history = interviews
        .into_iter()
        .map(|interview| HistoryItem {
            id: interview.user_interview_id,
            date: interview.created_at,
            score: score_percent(interview.total_score),
        })
        .collect();

    Ok(Json(HistoryListResponse { history }).into_response())
}

#[axum::debug_handler]
pub async fn get_history_detail(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(interview_number): Path<i32>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;

    let (interview, answers) = state
        .history_service
        .detail(user_id, interview_number)
        .await?
        .ok_or_else(|| {
            Error::NotFound(
                "Interview not found or does not belong to the current user".to_string(),
            )
        })?;

    let answers = answers
        .into_iter()
        .map(|answer| HistoryAnswerItem {
            id: answer.id,
            question_id: answer.question_id,
            user_answer: answer.user_answer,
            score: answer.score,
            feedback: answer.feedback,
        })
        .collect();

    Ok(Json(HistoryDetailResponse {
        id: interview.user_interview_id,
        date: interview.created_at,
        score: score_percent(interview.total_score),
        feedback: interview.feedback,
        answers,
    })
    .into_response())
}
