use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{NewUser, UserChanges, UserRepo};
use crate::error::AppError;
use crate::models::User;

pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn create(&self, new: NewUser<'_>) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, name, password_hash, avatar)
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(new.email)
        .bind(new.name)
        .bind(new.password_hash)
        .bind(new.avatar)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UserChanges<'_>) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET email = $2, password_hash = $3, avatar = $4, updated_at = now()
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.email)
        .bind(changes.password_hash)
        .bind(changes.avatar)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique)?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// The pre-insert uniqueness checks race under concurrent requests; the
/// unique indexes are the backstop, so map their violations to the same
/// conflict the checks would have produced.
fn map_unique(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return match db.constraint() {
                Some(c) if c.contains("name") => AppError::Conflict("name"),
                _ => AppError::Conflict("email"),
            };
        }
    }
    AppError::Database(err)
}
