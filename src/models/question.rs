use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from one of the two per-stack question pools. The `answer`
/// column holds the reference answer used for grading and is never
/// returned by interview endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i32,
    pub chance: Option<f64>,
    pub question: String,
    pub tag: Option<String>,
    pub answer: String,
}

/// Which pool an interview draws from. Each pool lives in its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "question_pool", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuestionPool {
    Python,
    Golang,
}

impl QuestionPool {
    pub fn table(&self) -> &'static str {
        match self {
            QuestionPool::Python => "python_questions",
            QuestionPool::Golang => "golang_questions",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionPool::Python => "python",
            QuestionPool::Golang => "golang",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_maps_to_its_table() {
        assert_eq!(QuestionPool::Python.table(), "python_questions");
        assert_eq!(QuestionPool::Golang.table(), "golang_questions");
    }

    #[test]
    fn pool_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&QuestionPool::Golang).unwrap(),
            "\"golang\""
        );
        let parsed: QuestionPool = serde_json::from_str("\"python\"").unwrap();
        assert_eq!(parsed, QuestionPool::Python);
    }
}
