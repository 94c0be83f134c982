//! In-memory repository implementations backing the test suite. The
//! Postgres repos are the production path; these keep the reset flow and
//! route tests free of a database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::clock::Clock;
use crate::db::{NewUser, ResetTokenRepo, UserChanges, UserRepo};
use crate::error::AppError;
use crate::models::{ResetToken, User};

pub struct MemoryUserRepo {
    clock: Arc<dyn Clock>,
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepo {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn create(&self, new: NewUser<'_>) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new.email) {
            return Err(AppError::Conflict("email"));
        }
        if users.iter().any(|u| u.name == new.name) {
            return Err(AppError::Conflict("name"));
        }
        let now = self.clock.now();
        let user = User {
            id: Uuid::now_v7(),
            email: new.email.to_string(),
            name: new.name.to_string(),
            password_hash: new.password_hash.to_string(),
            avatar: new.avatar.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.name == name)
            .cloned())
    }

    async fn update(&self, id: Uuid, changes: UserChanges<'_>) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.id != id && u.email == changes.email)
        {
            return Err(AppError::Conflict("email"));
        }
        let now = self.clock.now();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;
        user.email = changes.email.to_string();
        user.password_hash = changes.password_hash.to_string();
        user.avatar = changes.avatar.map(str::to_string);
        user.updated_at = now;
        Ok(user.clone())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.password_hash = password_hash.to_string();
            user.updated_at = self.clock.now();
        }
        Ok(())
    }
}

pub struct MemoryResetTokenRepo {
    clock: Arc<dyn Clock>,
    tokens: Mutex<Vec<ResetToken>>,
}

impl MemoryResetTokenRepo {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            tokens: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of all stored tokens, for assertions.
    pub fn all(&self) -> Vec<ResetToken> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResetTokenRepo for MemoryResetTokenRepo {
    async fn create(&self, user_id: Uuid, token: &str) -> Result<ResetToken, AppError> {
        let row = ResetToken {
            id: Uuid::now_v7(),
            token: token.to_string(),
            user_id,
            created_at: self.clock.now(),
        };
        self.tokens.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<ResetToken>, AppError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token == token)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| t.id != id);
        Ok(tokens.len() < before)
    }
}
