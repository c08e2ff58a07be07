use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::interview::InterviewStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartInterviewResponse {
    pub interview_id: i32,
    pub status: InterviewStatus,
    pub message: String,
}

/// The next question for the ongoing interview. The reference answer is
/// deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextQuestionResponse {
    pub question_id: i32,
    pub question_text: String,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnswerRequest {
    pub question_id: i32,
    #[validate(length(max = 10000, message = "Answer is too long"))]
    pub user_answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub score: f64,
    pub feedback: String,
    pub interview_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_feedback: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewStatusResponse {
    pub interview_id: i32,
    pub answered_questions: i64,
    pub total_questions: i64,
    /// Integer percent rendered as a string, e.g. "40%".
    pub progress: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishInterviewResponse {
    pub interview_id: i32,
    /// Final score as integer percent.
    pub score: i32,
    pub feedback: String,
}
