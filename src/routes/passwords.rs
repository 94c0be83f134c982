use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::SharedState;
use crate::validate;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
    pub reset_password_url: Option<String>,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: Option<String>,
    pub password: Option<String>,
}

pub async fn forgot_password(
    State(state): State<SharedState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<StatusCode, AppError> {
    let email = validate::required("email", &req.email)?;
    validate::email(email)?;
    let reset_password_url = validate::required("resetPasswordUrl", &req.reset_password_url)?;

    state.reset.issue(email, reset_password_url).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reset_password(
    State(state): State<SharedState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AppError> {
    let token = validate::required("token", &req.token)?;
    let plain = validate::required("password", &req.password)?;
    validate::password(plain)?;

    state.reset.redeem(token, plain).await?;
    Ok(StatusCode::NO_CONTENT)
}
