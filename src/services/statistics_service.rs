use sqlx::PgPool;

use crate::dto::statistics_dto::{InterviewStatistics, QuestionStatItem, QuestionsStatistics};
use crate::error::Result;
use crate::models::question::QuestionPool;

/// Answers matching one of these, or left blank, count as skipped.
const SKIP_PHRASES: [&str; 3] = ["skip", "пропустить", "не знаю"];

#[derive(Clone)]
pub struct StatisticsService {
    pool: PgPool,
    min_score_to_pass: f64,
}

#[derive(sqlx::FromRow)]
struct AnswerForStats {
    user_answer: String,
    score: Option<f64>,
}

#[derive(sqlx::FromRow)]
struct TopQuestionRow {
    question_id: i32,
    question_text: String,
    tag: Option<String>,
    success_rate: f64,
    answer_count: i64,
    pool: QuestionPool,
}

impl StatisticsService {
    pub fn new(pool: PgPool, min_score_to_pass: f64) -> Self {
        Self {
            pool,
            min_score_to_pass,
        }
    }

    /// Success ratio over the user's completed interviews.
    pub async fn interview_statistics(&self, user_id: i32) -> Result<InterviewStatistics> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM interviews WHERE user_id = $1 AND status = 'completed'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        if total == 0 {
            return Ok(InterviewStatistics {
                total_interviews: 0,
                successful_percent: 0.0,
                unsuccessful_percent: 0.0,
            });
        }

        let successful: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM interviews
            WHERE user_id = $1 AND status = 'completed' AND total_score >= $2
            "#,
        )
        .bind(user_id)
        .bind(self.min_score_to_pass)
        .fetch_one(&self.pool)
        .await?;

        let successful_percent = round2(successful as f64 / total as f64 * 100.0);
        Ok(InterviewStatistics {
            total_interviews: total,
            successful_percent,
            unsuccessful_percent: round2(100.0 - successful_percent),
        })
    }

    /// Success/skip ratios over every answer the user gave in completed
    /// interviews. Skip detection happens here rather than in SQL so the
    /// phrase matching is not at the mercy of the database collation.
    pub async fn questions_statistics(&self, user_id: i32) -> Result<QuestionsStatistics> {
        let answers = sqlx::query_as::<_, AnswerForStats>(
            r#"
            SELECT ua.user_answer, ua.score
            FROM user_answers ua
            JOIN interviews i ON i.id = ua.interview_id
            WHERE i.user_id = $1 AND i.status = 'completed'
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let total = answers.len() as i64;
        if total == 0 {
            return Ok(QuestionsStatistics {
                total_questions: 0,
                successful_percent: 0.0,
                unsuccessful_percent: 0.0,
                skipped_percent: 0.0,
            });
        }

        let successful = answers
            .iter()
            .filter(|a| a.score.is_some_and(|s| s >= self.min_score_to_pass))
            .count() as i64;
        let skipped = answers
            .iter()
            .filter(|a| is_skip_answer(&a.user_answer))
            .count() as i64;
        let unsuccessful = total - successful - skipped;

        Ok(QuestionsStatistics {
            total_questions: total,
            successful_percent: round2(successful as f64 / total as f64 * 100.0),
            unsuccessful_percent: round2(unsuccessful as f64 / total as f64 * 100.0),
            skipped_percent: round2(skipped as f64 / total as f64 * 100.0),
        })
    }

    pub async fn top_successful_questions(&self, user_id: i32) -> Result<Vec<QuestionStatItem>> {
        self.top_questions(user_id, true, 5).await
    }

    pub async fn top_unsuccessful_questions(&self, user_id: i32) -> Result<Vec<QuestionStatItem>> {
        self.top_questions(user_id, false, 5).await
    }

    /// Per-question success rates across the user's completed interviews,
    /// joined back to both pool tables for the question text.
    async fn top_questions(
        &self,
        user_id: i32,
        best_first: bool,
        limit: i64,
    ) -> Result<Vec<QuestionStatItem>> {
        let order = if best_first { "DESC" } else { "ASC" };
        let sql = format!(
            r#"
            WITH stats AS (
                SELECT ua.question_id,
                       ua.question_pool,
                       COUNT(ua.id) AS answer_count,
                       AVG(CASE WHEN ua.score >= $2 THEN 1.0 ELSE 0.0 END)::float8 AS success_rate
                FROM user_answers ua
                JOIN interviews i ON i.id = ua.interview_id
                WHERE i.user_id = $1 AND i.status = 'completed'
                GROUP BY ua.question_id, ua.question_pool
            )
            SELECT q.question_id, q.question_text, q.tag, q.success_rate, q.answer_count, q.pool
            FROM (
                SELECT p.id AS question_id, p.question AS question_text, p.tag,
                       s.success_rate, s.answer_count, s.question_pool AS pool
                FROM python_questions p
                JOIN stats s ON s.question_id = p.id AND s.question_pool = 'python'
                UNION ALL
                SELECT g.id, g.question, g.tag,
                       s.success_rate, s.answer_count, s.question_pool
                FROM golang_questions g
                JOIN stats s ON s.question_id = g.id AND s.question_pool = 'golang'
            ) q
            ORDER BY q.success_rate {}
            LIMIT $3
            "#,
            order
        );

        let rows = sqlx::query_as::<_, TopQuestionRow>(&sql)
            .bind(user_id)
            .bind(self.min_score_to_pass)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| QuestionStatItem {
                question_id: r.question_id,
                question_text: r.question_text,
                tag: r.tag,
                success_rate: round2(r.success_rate * 100.0),
                answer_count: r.answer_count,
                pool: r.pool,
            })
            .collect())
    }
}

pub fn is_skip_answer(answer: &str) -> bool {
    let normalized = answer.trim().to_lowercase();
    normalized.is_empty() || SKIP_PHRASES.contains(&normalized.as_str())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_detection_matches_phrases_case_insensitively() {
        assert!(is_skip_answer(""));
        assert!(is_skip_answer("   "));
        assert!(is_skip_answer("skip"));
        assert!(is_skip_answer("SKIP"));
        assert!(is_skip_answer(" Пропустить "));
        assert!(is_skip_answer("не знаю"));
        assert!(is_skip_answer("НЕ ЗНАЮ"));
    }

    #[test]
    fn skip_detection_keeps_real_answers() {
        assert!(!is_skip_answer("The GIL serializes bytecode execution"));
        assert!(!is_skip_answer("skip lists are a probabilistic structure"));
        assert!(!is_skip_answer("не знаю точно, но предположу: это мьютекс"));
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(100.0), 100.0);
    }
}
