use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{NewUser, UserChanges};
use crate::error::AppError;
use crate::models::User;
use crate::password;
use crate::state::SharedState;
use crate::validate;

// Fields are Option so absent values surface as our 422 body instead of a
// framework rejection.
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub user: User,
}

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let email = validate::required("email", &req.email)?;
    let name = validate::required("name", &req.name)?;
    let plain = validate::required("password", &req.password)?;
    validate::email(email)?;
    validate::password(plain)?;
    if let Some(avatar) = req.avatar.as_deref() {
        validate::avatar_url(avatar)?;
    }

    if state.users.find_by_email(email).await?.is_some() {
        return Err(AppError::Conflict("email"));
    }
    if state.users.find_by_name(name).await?.is_some() {
        return Err(AppError::Conflict("name"));
    }

    let password_hash = password::hash(plain).map_err(AppError::Internal)?;
    let user = state
        .users
        .create(NewUser {
            email,
            name,
            password_hash: &password_hash,
            avatar: req.avatar.as_deref(),
        })
        .await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let email = validate::required("email", &req.email)?;
    let plain = validate::required("password", &req.password)?;
    validate::email(email)?;
    validate::password(plain)?;
    if let Some(avatar) = req.avatar.as_deref() {
        validate::avatar_url(avatar)?;
    }

    let existing = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    if email != existing.email && state.users.find_by_email(email).await?.is_some() {
        return Err(AppError::Conflict("email"));
    }

    let password_hash = password::hash(plain).map_err(AppError::Internal)?;
    let user = state
        .users
        .update(
            id,
            UserChanges {
                email,
                password_hash: &password_hash,
                avatar: req.avatar.as_deref(),
            },
        )
        .await?;

    Ok(Json(UserResponse { user }))
}
