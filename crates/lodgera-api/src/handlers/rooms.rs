//! Room inventory and the direct-assignment command.

use crate::auth::models::AdminUser;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use lodgera_core::{models::NewRoom, AppError};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// POST /api/rooms/add
pub async fn add(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(form): Json<NewRoom>,
) -> Result<impl IntoResponse, HttpAppError> {
    form.validate().map_err(AppError::from)?;
    if form.rate <= Decimal::ZERO {
        return Err(AppError::InvalidInput("Invalid rate".to_string()).into());
    }

    let room = state.rooms.create(&form).await?;

    Ok(Json(json!({
        "message": "Room added",
        "roomId": room.id,
    })))
}

#[derive(Debug, Deserialize)]
pub struct AssignPayload {
    pub tenant_id: Uuid,
    pub room_id: Uuid,
}

/// POST /api/rooms/assign
pub async fn assign(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AssignPayload>,
) -> Result<impl IntoResponse, HttpAppError> {
    let room = state
        .rooms
        .assign_tenant(payload.tenant_id, payload.room_id)
        .await?;

    Ok(Json(json!({
        "message": "Tenant assigned successfully",
        "tenant_id": payload.tenant_id,
        "room_id": payload.room_id,
        "room": room,
    })))
}

/// GET /api/rooms/list (public)
pub async fn list(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, HttpAppError> {
    let rooms = state.rooms.list_inventory().await?;
    Ok(Json(rooms))
}
