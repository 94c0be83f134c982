pub mod memory;
pub mod reset_tokens;
pub mod users;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{ResetToken, User};

pub use reset_tokens::PgResetTokenRepo;
pub use users::PgUserRepo;

pub struct NewUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub avatar: Option<&'a str>,
}

pub struct UserChanges<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub avatar: Option<&'a str>,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, new: NewUser<'_>) -> Result<User, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError>;
    async fn update(&self, id: Uuid, changes: UserChanges<'_>) -> Result<User, AppError>;
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ResetTokenRepo: Send + Sync {
    async fn create(&self, user_id: Uuid, token: &str) -> Result<ResetToken, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<ResetToken>, AppError>;

    /// Remove a token row. Returns whether a row was actually deleted; under
    /// concurrent redemption only one caller observes `true`.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
