use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single-use password reset credential. Expiry is derived from
/// `created_at` at redemption time, never stored.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ResetToken {
    pub id: Uuid,
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
