use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::db::{ResetTokenRepo, UserRepo};
use crate::email::{templates, Email, Mailer};
use crate::error::AppError;
use crate::password;

pub const MAIL_FROM: &str = "no-reply@roleplay.com";
pub const MAIL_SUBJECT: &str = "Roleplay: Recuperção de senha";

/// Tokens are valid while `now - created_at <= 2 hours`.
pub const TOKEN_TTL_HOURS: i64 = 2;

/// Orchestrates the reset-token lifecycle: issuance on forgot-password and
/// single-use redemption with lazy expiry on reset-password. Depends only on
/// the repo/mailer/clock interfaces so the flow is testable in memory.
pub struct PasswordResetService {
    users: Arc<dyn UserRepo>,
    tokens: Arc<dyn ResetTokenRepo>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
}

impl PasswordResetService {
    pub fn new(
        users: Arc<dyn UserRepo>,
        tokens: Arc<dyn ResetTokenRepo>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            tokens,
            mailer,
            clock,
        }
    }

    /// Issue a fresh token for the account behind `email` and mail the reset
    /// link. Each call issues an independent token; earlier ones stay valid
    /// until their own expiry or redemption.
    pub async fn issue(&self, email: &str, reset_password_url: &str) -> Result<(), AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        let token = generate_token();
        self.tokens.create(user.id, &token).await?;

        let reset_link = format!("{reset_password_url}?token={token}");
        let html = templates::render_password_recovery(&user.name, &reset_link);
        self.mailer
            .send(Email {
                to: user.email.clone(),
                from: MAIL_FROM.to_string(),
                subject: MAIL_SUBJECT.to_string(),
                html,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Password reset token issued");
        Ok(())
    }

    /// Redeem a token: unknown tokens are NotFound, stale ones are
    /// TokenExpired (and left in place), valid ones set the new password and
    /// cease to exist. A redeemed token is indistinguishable from one that
    /// never existed.
    pub async fn redeem(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        let record = self
            .tokens
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::NotFound("token not found".to_string()))?;

        let age = self.clock.now() - record.created_at;
        if age > Duration::hours(TOKEN_TTL_HOURS) {
            return Err(AppError::TokenExpired);
        }

        // Claim the row before touching the password; zero rows affected
        // means a concurrent redemption got there first.
        if !self.tokens.delete(record.id).await? {
            return Err(AppError::NotFound("token not found".to_string()));
        }

        let hash = password::hash(new_password).map_err(AppError::Internal)?;
        self.users.update_password(record.user_id, &hash).await?;

        tracing::info!(user_id = %record.user_id, "Password reset completed");
        Ok(())
    }
}

fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}
