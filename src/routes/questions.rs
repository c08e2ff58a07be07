use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Response},
    Extension,
};

use crate::dto::question_dto::{QuestionListQuery, QuestionListResponse};
use crate::middleware::auth::Claims;
use crate::AppState;

/// Paginated question listing for study. Unlike the interview endpoints
/// this one does include the reference answers.
#[axum::debug_handler]
pub async fn list_questions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<QuestionListQuery>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;

    let pool = match query.pool {
        Some(pool) => pool,
        None => state.question_service.pool_for_user(user_id).await?,
    };
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(100).clamp(1, 100);

    let (items, total) = state
        .question_service
        .list(pool, query.tag, page, limit)
        .await?;
    let pages = (total + limit - 1) / limit;

    Ok(Json(QuestionListResponse {
        items,
        total,
        page,
        pages,
        limit,
    })
    .into_response())
}
