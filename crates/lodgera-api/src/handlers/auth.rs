//! Registration, login, and the boarder's account card.

use crate::auth::models::TenantUser;
use crate::auth::{jwt, password};
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{extract::State, Json};
use lodgera_core::{models::UserRole, AppError};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(length(min = 1, message = "Name, email, and password are required."))]
    pub name: String,
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub password: String,
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    payload.validate().map_err(AppError::from)?;

    let role = payload.role.unwrap_or(UserRole::Client);
    let password_hash = password::hash_password(&payload.password)?;

    state
        .users
        .create(&payload.name, &payload.email, &password_hash, role)
        .await?;

    Ok(Json(json!({ "message": "Registration successful!" })))
}

/// POST /api/auth/login
///
/// Unknown email and wrong password return the same message so the
/// response does not reveal which one was wrong.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    let user = state
        .users
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::InvalidInput("Invalid email or password.".to_string()))?;

    let matches = password::verify_password(&payload.password, &user.password_hash)?;
    if !matches {
        return Err(AppError::InvalidInput("Invalid email or password.".to_string()).into());
    }

    let token = jwt::issue_token(
        user.id,
        user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )?;

    Ok(Json(json!({
        "message": "Login successful!",
        "token": token,
        "user": {
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "role": user.role,
        },
    })))
}

/// GET /api/client/dashboard
///
/// The boarder's account card (name and email). `tenant` is null when
/// the account no longer exists.
pub async fn client_dashboard(
    tenant: TenantUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    let card = state
        .users
        .find_by_id(tenant.0.user_id)
        .await?
        .map(|user| json!({ "tenant_name": user.name, "tenant_email": user.email }));

    Ok(Json(json!({ "tenant": card })))
}
