use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed interview as shown in the history list. `id` is the
/// per-user interview number, not the global row id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: i32,
    pub date: DateTime<Utc>,
    /// Final score as integer percent, 0 when the interview never got one.
    pub score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryListResponse {
    pub history: Vec<HistoryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryAnswerItem {
    pub id: i32,
    pub question_id: i32,
    pub user_answer: String,
    pub score: Option<f64>,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryDetailResponse {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub score: i32,
    pub feedback: Option<String>,
    pub answers: Vec<HistoryAnswerItem>,
}
