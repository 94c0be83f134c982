use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::ResetTokenRepo;
use crate::error::AppError;
use crate::models::ResetToken;

pub struct PgResetTokenRepo {
    pool: PgPool,
}

impl PgResetTokenRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResetTokenRepo for PgResetTokenRepo {
    async fn create(&self, user_id: Uuid, token: &str) -> Result<ResetToken, AppError> {
        let row = sqlx::query_as::<_, ResetToken>(
            "INSERT INTO reset_tokens (user_id, token) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(token)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<ResetToken>, AppError> {
        let row = sqlx::query_as::<_, ResetToken>("SELECT * FROM reset_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM reset_tokens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
