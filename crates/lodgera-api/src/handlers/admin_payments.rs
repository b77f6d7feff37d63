//! Admin-side payment adjudication and revenue reporting.

use crate::auth::models::AdminUser;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use lodgera_core::AppError;
use lodgera_db::RevenuePeriod;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// GET /api/payments/admin/all
pub async fn all(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let payments = state.payments.list_all().await?;
    Ok(Json(payments))
}

/// PATCH /api/payments/admin/approve/{id}
pub async fn approve(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let approval = state.payments.approve(payment_id).await?;

    Ok(Json(json!({
        "message": "Payment approved",
        "status": approval.status,
        "balance": approval.balance,
    })))
}

/// PATCH /api/payments/admin/reject/{id}
pub async fn reject(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let status = state.payments.reject(payment_id).await?;

    Ok(Json(json!({
        "message": "Payment rejected",
        "status": status,
    })))
}

#[derive(Debug, Deserialize)]
pub struct RevenueQuery {
    pub month: Option<u32>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// GET /api/payments/admin/revenue?month=|start=&end=
///
/// A month-only filter resolves against the current calendar year.
pub async fn revenue(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Query(query): Query<RevenueQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let period = match (query.month, query.start, query.end) {
        (Some(month), _, _) => {
            if !(1..=12).contains(&month) {
                return Err(AppError::InvalidInput("Invalid month".to_string()).into());
            }
            RevenuePeriod::Month(month)
        }
        (None, Some(start), Some(end)) => {
            if start > end {
                return Err(AppError::InvalidInput("Invalid date range".to_string()).into());
            }
            RevenuePeriod::Range(start, end)
        }
        (None, Some(_), None) | (None, None, Some(_)) => {
            return Err(
                AppError::InvalidInput("Both start and end are required".to_string()).into(),
            );
        }
        (None, None, None) => RevenuePeriod::All,
    };

    let report = state.payments.revenue(period).await?;
    Ok(Json(report))
}
