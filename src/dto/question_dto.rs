use serde::{Deserialize, Serialize};

use crate::models::question::{Question, QuestionPool};

/// Query string for the question listing. `pool` defaults to the pool
/// the requesting user would be interviewed from.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionListQuery {
    pub pool: Option<QuestionPool>,
    pub tag: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionListResponse {
    pub items: Vec<Question>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
    pub limit: i64,
}
