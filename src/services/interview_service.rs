use sqlx::PgPool;

use crate::error::Result;
use crate::models::interview::Interview;
use crate::models::question::QuestionPool;
use crate::models::user_answer::UserAnswer;

#[derive(Clone)]
pub struct InterviewService {
    pool: PgPool,
}

impl InterviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a new ongoing interview drawing from `question_pool`. The
    /// per-user interview number continues the user's own sequence;
    /// any previously ongoing interview simply stops being the latest.
    pub async fn start(&self, user_id: i32, question_pool: QuestionPool) -> Result<Interview> {
        let mut tx = self.pool.begin().await?;

        let next_number: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(user_interview_id), 0) + 1 FROM interviews WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let interview = sqlx::query_as::<_, Interview>(
            r#"
            INSERT INTO interviews (user_id, status, question_pool, user_interview_id)
            VALUES ($1, 'ongoing', $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(question_pool)
        .bind(next_number)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(interview)
    }

    /// The user's current interview: the latest ongoing row, if any.
    pub async fn current_ongoing(&self, user_id: i32) -> Result<Option<Interview>> {
        let interview = sqlx::query_as::<_, Interview>(
            r#"
            SELECT * FROM interviews
            WHERE user_id = $1 AND status = 'ongoing'
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(interview)
    }

    pub async fn answered_question_ids(&self, interview_id: i32) -> Result<Vec<i32>> {
        let ids: Vec<i32> =
            sqlx::query_scalar("SELECT question_id FROM user_answers WHERE interview_id = $1")
                .bind(interview_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(ids)
    }

    pub async fn has_answered(&self, interview_id: i32, question_id: i32) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM user_answers WHERE interview_id = $1 AND question_id = $2)",
        )
        .bind(interview_id)
        .bind(question_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn count_answers(&self, interview_id: i32) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_answers WHERE interview_id = $1")
                .bind(interview_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn record_answer(
        &self,
        interview_id: i32,
        question_id: i32,
        question_pool: QuestionPool,
        user_answer: &str,
        score: f64,
        feedback: &str,
    ) -> Result<UserAnswer> {
        let answer = sqlx::query_as::<_, UserAnswer>(
            r#"
            INSERT INTO user_answers (interview_id, question_id, question_pool, user_answer, score, feedback)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(interview_id)
        .bind(question_id)
        .bind(question_pool)
        .bind(user_answer)
        .bind(score)
        .bind(feedback)
        .fetch_one(&self.pool)
        .await?;
        Ok(answer)
    }

    /// Marks the interview completed and stores the aggregate score and
    /// verdict. Safe to call again on an already completed interview:
    /// the recomputed aggregate is identical.
    pub async fn finalize(&self, interview_id: i32) -> Result<(f64, String)> {
        let avg: f64 = sqlx::query_scalar(
            "SELECT COALESCE(AVG(score), 0.0) FROM user_answers WHERE interview_id = $1",
        )
        .bind(interview_id)
        .fetch_one(&self.pool)
        .await?;

        let verdict = verdict_for(avg).to_string();

        sqlx::query(
            r#"
            UPDATE interviews
            SET status = 'completed', total_score = $1, feedback = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(avg)
        .bind(&verdict)
        .bind(interview_id)
        .execute(&self.pool)
        .await?;

        tracing::info!(interview_id, score = avg, "Interview finalized");
        Ok((avg, verdict))
    }
}

/// Verdict text for an aggregate score in [0, 1].
pub fn verdict_for(score: f64) -> &'static str {
    if score > 0.8 {
        "Excellent result! You know the material well."
    } else if score > 0.6 {
        "Good result! Brush up on a few topics to improve."
    } else if score > 0.4 {
        "Average result. We recommend revisiting the core topics."
    } else {
        "Below average. We recommend further study of the material."
    }
}

/// Progress as an integer-percent label, "0%" when there is nothing to
/// answer.
pub fn progress_label(answered: i64, total: i64) -> String {
    if total > 0 {
        format!("{}%", answered * 100 / total)
    } else {
        "0%".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_follows_thresholds() {
        assert!(verdict_for(0.9).starts_with("Excellent"));
        assert!(verdict_for(0.81).starts_with("Excellent"));
        assert!(verdict_for(0.8).starts_with("Good"));
        assert!(verdict_for(0.61).starts_with("Good"));
        assert!(verdict_for(0.6).starts_with("Average"));
        assert!(verdict_for(0.41).starts_with("Average"));
        assert!(verdict_for(0.4).starts_with("Below average"));
        assert!(verdict_for(0.0).starts_with("Below average"));
    }

    #[test]
    fn progress_uses_integer_division() {
        assert_eq!(progress_label(0, 10), "0%");
        assert_eq!(progress_label(4, 10), "40%");
        assert_eq!(progress_label(1, 3), "33%");
        assert_eq!(progress_label(10, 10), "100%");
    }

    #[test]
    fn progress_handles_empty_pool() {
        assert_eq!(progress_label(0, 0), "0%");
    }
}
