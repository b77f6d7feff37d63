//! Tenant onboarding: admin listings, the approval command, and the
//! boarder's own request/dashboard/billing views.

use crate::auth::models::{AdminUser, TenantUser};
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lodgera_core::{error::ApprovalError, settlement, AppError};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct TenantListQuery {
    pub month: Option<u32>,
    pub search: Option<String>,
}

/// GET /api/tenants/all
pub async fn all(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Query(query): Query<TenantListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let tenants = state
        .tenants
        .list_all(query.month, query.search.as_deref())
        .await?;

    Ok(Json(tenants))
}

/// GET /api/tenants/pending
pub async fn pending(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let tenants = state.tenants.list_pending().await?;
    Ok(Json(tenants))
}

/// PATCH /api/tenants/approve/{id}
///
/// A full room is a 400 carrying alternative rooms, so the admin screen
/// can offer a reassignment without a second round trip.
pub async fn approve(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<Uuid>,
) -> Response {
    match state.tenants.approve(tenant_id).await {
        Ok(room) => Json(json!({
            "success": true,
            "message": "Tenant approved successfully",
            "tenantId": tenant_id,
            "room": room,
        }))
        .into_response(),
        Err(ApprovalError::RoomFull { available_rooms }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "Room is already full. Please assign another room.",
                "availableRooms": available_rooms,
            })),
        )
            .into_response(),
        Err(ApprovalError::TenantNotFound) => {
            HttpAppError(AppError::NotFound("Tenant not found".to_string())).into_response()
        }
        Err(ApprovalError::NoRoomAssigned) => {
            HttpAppError(AppError::InvalidInput("Tenant has no assigned room".to_string()))
                .into_response()
        }
        Err(ApprovalError::RoomNotFound) => {
            HttpAppError(AppError::NotFound("Room not found".to_string())).into_response()
        }
        Err(ApprovalError::App(err)) => HttpAppError(err).into_response(),
    }
}

/// POST /api/tenants/request-room
pub async fn request_room(
    tenant: TenantUser,
    State(state): State<Arc<AppState>>,
    Json(form): Json<lodgera_core::models::RoomRequestForm>,
) -> Result<impl IntoResponse, HttpAppError> {
    form.validate().map_err(AppError::from)?;

    let (tenant_id, updated) = state.tenants.submit_request(tenant.0.user_id, &form).await?;
    let message = if updated {
        "Room request updated"
    } else {
        "Room request submitted"
    };

    Ok(Json(json!({
        "success": true,
        "message": message,
        "tenantId": tenant_id,
    })))
}

/// GET /api/tenants/my-request
pub async fn my_request(
    tenant: TenantUser,
    State(state): State<Arc<AppState>>,
) -> Result<Response, HttpAppError> {
    match state.tenants.my_request(tenant.0.user_id).await? {
        Some(request) => Ok(Json(request).into_response()),
        None => Ok(Json(json!({ "message": "No request found" })).into_response()),
    }
}

/// GET /api/tenants/dashboard
pub async fn dashboard(
    tenant: TenantUser,
    State(state): State<Arc<AppState>>,
) -> Result<Response, HttpAppError> {
    match state.tenants.dashboard(tenant.0.user_id).await? {
        Some(card) => Ok(Json(json!({ "tenant": card })).into_response()),
        None => Ok(Json(json!({
            "tenant": {
                "tenant_name": "Unknown Tenant",
                "room_number": null,
                "type": null,
                "rate": null,
                "status": "No Request",
            },
        }))
        .into_response()),
    }
}

/// GET /api/tenants/summary
///
/// The stored balance falls back to the room rate when it is exactly
/// zero, the same rule payment approval applies.
pub async fn summary(
    tenant: TenantUser,
    State(state): State<Arc<AppState>>,
) -> Result<Response, HttpAppError> {
    let Some(billing) = state.tenants.billing_summary(tenant.0.user_id).await? else {
        return Ok(Json(json!({
            "success": false,
            "message": "Tenant not found",
        }))
        .into_response());
    };

    let room_rate = billing.room_rate.unwrap_or(Decimal::ZERO);
    let balance = settlement::effective_balance(billing.balance, room_rate);

    Ok(Json(json!({
        "success": true,
        "tenant": {
            "room_number": billing.room_number,
            "room_rate": room_rate,
            "balance": balance,
        },
    }))
    .into_response())
}

/// GET /api/tenants/upcoming-dues
pub async fn upcoming_dues(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let dues = state.tenants.upcoming_dues().await?;
    Ok(Json(dues))
}

#[derive(Debug, Deserialize, Validate)]
pub struct NotifyPayload {
    #[validate(email(message = "to, subject and message are required"))]
    pub to: String,
    #[validate(length(min = 1, message = "to, subject and message are required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "to, subject and message are required"))]
    pub message: String,
}

/// POST /api/tenants/notify-email
pub async fn notify_email(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NotifyPayload>,
) -> Result<Response, HttpAppError> {
    payload.validate().map_err(AppError::from)?;

    let Some(mailer) = state.mailer.as_ref() else {
        tracing::warn!("Notification email requested but SMTP is not configured");
        return Ok(notify_failure());
    };

    match mailer.send(&payload.to, &payload.subject, &payload.message).await {
        Ok(()) => Ok(Json(json!({
            "success": true,
            "message": "Notification sent",
        }))
        .into_response()),
        Err(err) => {
            tracing::error!(error = %err, "Failed to send notification email");
            Ok(notify_failure())
        }
    }
}

fn notify_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "message": "Failed to send notification",
        })),
    )
        .into_response()
}
