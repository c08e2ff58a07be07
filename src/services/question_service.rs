use rand::Rng;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::question::{Question, QuestionPool};

#[derive(Clone)]
pub struct QuestionService {
    pool: PgPool,
}

impl QuestionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolves which question pool the user interviews from, based on
    /// their registered languages and directions.
    pub async fn pool_for_user(&self, user_id: i32) -> Result<QuestionPool> {
        let languages: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT l.name FROM languages l
            JOIN user_languages ul ON ul.language_id = l.id
            WHERE ul.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let directions: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT d.name FROM directions d
            JOIN user_directions ud ON ud.direction_id = d.id
            WHERE ud.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(pool_for_selections(&languages, &directions))
    }

    /// Picks one random question from the pool, excluding ids that were
    /// already answered. Returns None when nothing is left.
    pub async fn random_unanswered(
        &self,
        pool: QuestionPool,
        exclude_ids: &[i32],
    ) -> Result<Option<Question>> {
        let count_sql = format!(
            "SELECT COUNT(*) FROM {} WHERE NOT (id = ANY($1))",
            pool.table()
        );
        let count: i64 = sqlx::query_scalar(&count_sql)
            .bind(exclude_ids)
            .fetch_one(&self.pool)
            .await?;

        if count == 0 {
            return Ok(None);
        }

        let offset = rand::thread_rng().gen_range(0..count);
        let pick_sql = format!(
            "SELECT * FROM {} WHERE NOT (id = ANY($1)) ORDER BY id OFFSET $2 LIMIT 1",
            pool.table()
        );
        let question = sqlx::query_as::<_, Question>(&pick_sql)
            .bind(exclude_ids)
            .bind(offset)
            .fetch_optional(&self.pool)
            .await?;

        Ok(question)
    }

    pub async fn find_by_id(&self, pool: QuestionPool, question_id: i32) -> Result<Option<Question>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", pool.table());
        let question = sqlx::query_as::<_, Question>(&sql)
            .bind(question_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(question)
    }

    pub async fn count(&self, pool: QuestionPool) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", pool.table());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Paginated listing with an optional tag filter.
    pub async fn list(
        &self,
        pool: QuestionPool,
        tag: Option<String>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Question>, i64)> {
        let offset = (page - 1) * limit;

        let rows_sql = format!(
            r#"
            SELECT * FROM {}
            WHERE ($1::text IS NULL OR tag = $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
            pool.table()
        );
        let rows = sqlx::query_as::<_, Question>(&rows_sql)
            .bind(tag.clone())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let count_sql = format!(
            "SELECT COUNT(*) FROM {} WHERE ($1::text IS NULL OR tag = $1)",
            pool.table()
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(tag)
            .fetch_one(&self.pool)
            .await?;

        Ok((rows, total))
    }
}

/// Go developers heading for backend get the Go pool; everyone else gets
/// Python. Matching is case-insensitive.
pub fn pool_for_selections(languages: &[String], directions: &[String]) -> QuestionPool {
    let wants_go = languages
        .iter()
        .any(|l| matches!(l.to_lowercase().as_str(), "go" | "golang"));
    let wants_backend = directions.iter().any(|d| d.to_lowercase() == "backend");

    if wants_go && wants_backend {
        QuestionPool::Golang
    } else {
        QuestionPool::Python
    }
}
