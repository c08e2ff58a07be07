use serde::{Deserialize, Serialize};

use crate::models::question::QuestionPool;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewStatistics {
    pub total_interviews: i64,
    pub successful_percent: f64,
    pub unsuccessful_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsStatistics {
    pub total_questions: i64,
    pub successful_percent: f64,
    pub unsuccessful_percent: f64,
    pub skipped_percent: f64,
}

/// Per-question aggregate over the user's completed interviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionStatItem {
    pub question_id: i32,
    pub question_text: String,
    pub tag: Option<String>,
    /// Share of answers at or above the pass threshold, as percent.
    pub success_rate: f64,
    pub answer_count: i64,
    pub pool: QuestionPool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopQuestionsResponse {
    pub questions: Vec<QuestionStatItem>,
}
