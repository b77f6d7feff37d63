//! Admin user administration.

use crate::auth::models::AdminUser;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use lodgera_core::{
    models::{UserRole, UserStatus},
    AppError,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// GET /api/users/all
pub async fn all(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UserUpdatePayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
}

/// PUT /api/users/update/{id}
pub async fn update(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserUpdatePayload>,
) -> Result<impl IntoResponse, HttpAppError> {
    payload.validate().map_err(AppError::from)?;

    state
        .users
        .update(id, &payload.name, &payload.email, payload.role, payload.status)
        .await?;

    Ok(Json(json!({ "message": "User updated" })))
}

/// DELETE /api/users/delete/{id}
pub async fn delete(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.users.delete(id).await?;

    Ok(Json(json!({ "message": "User deleted" })))
}
