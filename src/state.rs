use std::sync::Arc;

use crate::db::UserRepo;
use crate::reset::PasswordResetService;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub reset: PasswordResetService,
}
