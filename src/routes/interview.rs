use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    Extension,
};
use validator::Validate;

use crate::dto::interview_dto::{
    AnswerRequest, AnswerResponse, FinishInterviewResponse, InterviewStatusResponse,
    NextQuestionResponse, StartInterviewResponse,
};
use crate::error::Error;
use crate::middleware::auth::Claims;
use crate::models::interview::Interview;
use crate::services::interview_service::progress_label;
use crate::AppState;

/// The latest ongoing interview, or the 404 every interview endpoint
/// answers with when there is none.
async fn require_ongoing(state: &AppState, user_id: i32) -> crate::error::Result<Interview> {
    state
        .interview_service
        .current_ongoing(user_id)
        .await?
        .ok_or_else(|| {
            Error::NotFound("No active interview found. Start a new interview.".to_string())
        })
}

#[axum::debug_handler]
pub async fn start_interview(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let pool = state.question_service.pool_for_user(user_id).await?;
    let interview = state.interview_service.start(user_id, pool).await?;

    tracing::info!(
        user_id,
        interview_id = interview.id,
        pool = pool.as_str(),
        "Interview started"
    );

    Ok(Json(StartInterviewResponse {
        interview_id: interview.id,
        status: interview.status,
        message: "Interview started".to_string(),
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn get_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let interview = require_ongoing(&state, user_id).await?;

    let answered = state
        .interview_service
        .answered_question_ids(interview.id)
        .await?;
    let budget = crate::config::get_config().questions_per_interview;

    if (answered.len() as i64) < budget {
        if let Some(question) = state
            .question_service
            .random_unanswered(interview.question_pool, &answered)
            .await?
        {
            return Ok(Json(NextQuestionResponse {
                question_id: question.id,
                question_text: question.question,
                tag: question.tag,
            })
            .into_response());
        }
    }

    // Budget reached or pool exhausted: the interview is over.
    state.interview_service.finalize(interview.id).await?;
    Err(Error::NotFound(
        "All questions answered. The interview is completed.".to_string(),
    ))
}

#[axum::debug_handler]
pub async fn submit_answer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AnswerRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let user_id = claims.user_id()?;
    let interview = require_ongoing(&state, user_id).await?;

    let question = state
        .question_service
        .find_by_id(interview.question_pool, req.question_id)
        .await?
        .ok_or_else(|| Error::NotFound("Question not found".to_string()))?;

    if state
        .interview_service
        .has_answered(interview.id, req.question_id)
        .await?
    {
        return Err(Error::BadRequest(
            "You have already answered this question".to_string(),
        ));
    }

    let (score, feedback) = state
        .gigachat
        .evaluate_answer(&question.question, &question.answer, &req.user_answer)
        .await;

    state
        .interview_service
        .record_answer(
            interview.id,
            question.id,
            interview.question_pool,
            &req.user_answer,
            score,
            &feedback,
        )
        .await?;

    let budget = crate::config::get_config().questions_per_interview;
    let answered = state.interview_service.count_answers(interview.id).await?;
    let pool_size = state.question_service.count(interview.question_pool).await?;

    let completed = answered >= budget || answered >= pool_size;
    let (final_score, final_feedback) = if completed {
        let (avg, verdict) = state.interview_service.finalize(interview.id).await?;
        (Some(avg), Some(verdict))
    } else {
        (None, None)
    };

    Ok(Json(AnswerResponse {
        score,
        feedback,
        interview_completed: completed,
        final_score,
        final_feedback,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn get_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let interview = require_ongoing(&state, user_id).await?;

    let answered = state.interview_service.count_answers(interview.id).await?;
    let pool_size = state.question_service.count(interview.question_pool).await?;
    let budget = crate::config::get_config().questions_per_interview;
    let total = pool_size.min(budget);

    Ok(Json(InterviewStatusResponse {
        interview_id: interview.id,
        answered_questions: answered,
        total_questions: total,
        progress: progress_label(answered, total),
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn finish_interview(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let interview = require_ongoing(&state, user_id).await?;

    let (avg, verdict) = state.interview_service.finalize(interview.id).await?;

    Ok(Json(FinishInterviewResponse {
        interview_id: interview.id,
        score: (avg * 100.0) as i32,
        feedback: verdict,
    })
    .into_response())
}
