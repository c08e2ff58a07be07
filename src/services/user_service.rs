use sqlx::PgPool;

use crate::dto::auth_dto::RegisterRequest;
use crate::error::{Error, Result};
use crate::models::taxonomy::{Direction, Language};
use crate::models::user::User;
use crate::utils::crypto::{hash_password, verify_password};

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the user plus their direction/language selections in one
    /// transaction. The email must be free and every referenced taxonomy
    /// id must exist.
    pub async fn register(&self, req: RegisterRequest) -> Result<User> {
        let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(&req.email)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let known_directions: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM directions WHERE id = ANY($1)")
                .bind(&req.direction_ids)
                .fetch_one(&self.pool)
                .await?;
        if known_directions != req.direction_ids.len() as i64 {
            return Err(Error::BadRequest(
                "One or more selected directions do not exist".to_string(),
            ));
        }

        let known_languages: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM languages WHERE id = ANY($1)")
                .bind(&req.language_ids)
                .fetch_one(&self.pool)
                .await?;
        if known_languages != req.language_ids.len() as i64 {
            return Err(Error::BadRequest(
                "One or more selected languages do not exist".to_string(),
            ));
        }

        let hashed = hash_password(&req.password)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;

        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, hashed_password, name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&req.email)
        .bind(&hashed)
        .bind(&req.name)
        .fetch_one(&mut *tx)
        .await?;

        for direction_id in &req.direction_ids {
            sqlx::query("INSERT INTO user_directions (user_id, direction_id) VALUES ($1, $2)")
                .bind(user.id)
                .bind(direction_id)
                .execute(&mut *tx)
                .await?;
        }
        for language_id in &req.language_ids {
            sqlx::query("INSERT INTO user_languages (user_id, language_id) VALUES ($1, $2)")
                .bind(user.id)
                .bind(language_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(user)
    }

    /// Returns the user when the email/password pair checks out.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Unauthorized("Incorrect email or password".to_string()))?;

        let valid = verify_password(password, &user.hashed_password)
            .map_err(|e| Error::Internal(format!("Failed to verify password: {}", e)))?;
        if !valid {
            return Err(Error::Unauthorized(
                "Incorrect email or password".to_string(),
            ));
        }
        Ok(user)
    }

    pub async fn get_by_id(&self, user_id: i32) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn directions_of(&self, user_id: i32) -> Result<Vec<Direction>> {
        let rows = sqlx::query_as::<_, Direction>(
            r#"
            SELECT d.id, d.name FROM directions d
            JOIN user_directions ud ON ud.direction_id = d.id
            WHERE ud.user_id = $1
            ORDER BY d.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn languages_of(&self, user_id: i32) -> Result<Vec<Language>> {
        let rows = sqlx::query_as::<_, Language>(
            r#"
            SELECT l.id, l.name FROM languages l
            JOIN user_languages ul ON ul.language_id = l.id
            WHERE ul.user_id = $1
            ORDER BY l.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_directions(&self) -> Result<Vec<Direction>> {
        let rows = sqlx::query_as::<_, Direction>("SELECT * FROM directions ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn create_direction(&self, name: &str) -> Result<Direction> {
        let existing =
            sqlx::query_as::<_, Direction>("SELECT * FROM directions WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(Error::BadRequest(format!(
                "Direction with name '{}' already exists",
                name
            )));
        }

        let direction = sqlx::query_as::<_, Direction>(
            "INSERT INTO directions (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(direction)
    }

    pub async fn delete_direction(&self, direction_id: i32) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM directions WHERE id = $1")
            .bind(direction_id)
            .execute(&self.pool)
            .await?;
        if deleted.rows_affected() == 0 {
            return Err(Error::NotFound(format!(
                "Direction with ID {} not found",
                direction_id
            )));
        }
        Ok(())
    }

    pub async fn list_languages(&self) -> Result<Vec<Language>> {
        let rows = sqlx::query_as::<_, Language>("SELECT * FROM languages ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn create_language(&self, name: &str) -> Result<Language> {
        let existing = sqlx::query_as::<_, Language>("SELECT * FROM languages WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::BadRequest(format!(
                "Language with name '{}' already exists",
                name
            )));
        }

        let language = sqlx::query_as::<_, Language>(
            "INSERT INTO languages (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(language)
    }

    pub async fn delete_language(&self, language_id: i32) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM languages WHERE id = $1")
            .bind(language_id)
            .execute(&self.pool)
            .await?;
        if deleted.rows_affected() == 0 {
            return Err(Error::NotFound(format!(
                "Language with ID {} not found",
                language_id
            )));
        }
        Ok(())
    }
}
