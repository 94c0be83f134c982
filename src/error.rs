use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    /// Malformed or missing input. 422, code BAD_REQUEST.
    Validation(String),
    /// Uniqueness violation; carries the colliding field. 409, code BAD_REQUEST.
    Conflict(&'static str),
    /// Unknown user or reset token. 404, code BAD_REQUEST.
    NotFound(String),
    /// Reset token older than the 2-hour window. 410, code TOKEN_EXPIRED.
    TokenExpired,
    Internal(String),
    Database(sqlx::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation: {msg}"),
            AppError::Conflict(field) => write!(f, "Conflict: {field} already in use"),
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::TokenExpired => write!(f, "Gone: token has expired"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            AppError::Database(err) => write!(f, "Database Error: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST", msg.clone())
            }
            AppError::Conflict(field) => (
                StatusCode::CONFLICT,
                "BAD_REQUEST",
                format!("{field} already in use"),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "BAD_REQUEST", msg.clone()),
            AppError::TokenExpired => (
                StatusCode::GONE,
                "TOKEN_EXPIRED",
                "token has expired".to_string(),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Internal server error".to_string(),
                )
            }
            AppError::Database(err) => {
                tracing::error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = json!({
            "code": code,
            "status": status.as_u16(),
            "message": message,
        });
        (status, axum::Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}
