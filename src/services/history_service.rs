use sqlx::PgPool;

use crate::error::Result;
use crate::models::interview::Interview;
use crate::models::user_answer::UserAnswer;

#[derive(Clone)]
pub struct HistoryService {
    pool: PgPool,
}

impl HistoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Completed interviews of the user, newest first.
    pub async fn list_completed(&self, user_id: i32) -> Result<Vec<Interview>> {
        let interviews = sqlx::query_as::<_, Interview>(
            r#"
            SELECT * FROM interviews
            WHERE user_id = $1 AND status = 'completed'
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(interviews)
    }

    /// One completed interview addressed by its per-user number, with
    /// all its answers. None when it does not exist, is still ongoing,
    /// or belongs to someone else.
    pub async fn detail(
        &self,
        user_id: i32,
        user_interview_id: i32,
    ) -> Result<Option<(Interview, Vec<UserAnswer>)>> {
        let interview = sqlx::query_as::<_, Interview>(
            r#"
            SELECT * FROM interviews
            WHERE user_id = $1 AND user_interview_id = $2 AND status = 'completed'
            "#,
        )
        .bind(user_id)
        .bind(user_interview_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(interview) = interview else {
            return Ok(None);
        };

        let answers = sqlx::query_as::<_, UserAnswer>(
            "SELECT * FROM user_answers WHERE interview_id = $1 ORDER BY id",
        )
        .bind(interview.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some((interview, answers)))
    }
}

/// Aggregate score as truncated integer percent; 0 when not graded.
pub fn score_percent(total_score: Option<f64>) -> i32 {
    total_score.map(|s| (s * 100.0) as i32).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_percent_truncates() {
        assert_eq!(score_percent(Some(0.666)), 66);
        assert_eq!(score_percent(Some(1.0)), 100);
        assert_eq!(score_percent(Some(0.0)), 0);
        assert_eq!(score_percent(None), 0);
    }
}
