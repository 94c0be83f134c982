pub mod passwords;
pub mod users;

use axum::routing::{post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/users", post(users::create))
        .route("/users/{id}", put(users::update))
        .route("/forgot-password", post(passwords::forgot_password))
        .route("/reset-password", put(passwords::reset_password))
}
