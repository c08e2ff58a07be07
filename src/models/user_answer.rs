use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::question::QuestionPool;

/// One graded answer inside an interview. A NULL score means grading
/// never produced a usable result for this answer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserAnswer {
    pub id: i32,
    pub interview_id: i32,
    pub question_id: i32,
    pub question_pool: QuestionPool,
    pub user_answer: String,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}
