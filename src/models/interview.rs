use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::question::QuestionPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interview_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Ongoing,
    Completed,
}

/// An interview session. `user_interview_id` is a per-user sequence
/// starting at 1, shown to the user instead of the global id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interview {
    pub id: i32,
    pub user_id: i32,
    pub status: InterviewStatus,
    pub total_score: Option<f64>,
    pub feedback: Option<String>,
    pub question_pool: QuestionPool,
    pub user_interview_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
