//! Expense bookkeeping CRUD.

use crate::auth::models::AdminUser;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use lodgera_core::{models::ExpenseForm, AppError};
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

fn validate_form(form: &ExpenseForm) -> Result<(), HttpAppError> {
    form.validate().map_err(AppError::from)?;
    if form.amount <= Decimal::ZERO {
        return Err(AppError::InvalidInput("Invalid amount".to_string()).into());
    }
    Ok(())
}

/// POST /api/expenses/add
pub async fn add(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(form): Json<ExpenseForm>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_form(&form)?;
    let expense = state.expenses.create(&form).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Expense added",
        "expenseId": expense.id,
    })))
}

/// GET /api/expenses/all
pub async fn all(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let expenses = state.expenses.list().await?;
    Ok(Json(expenses))
}

/// PUT /api/expenses/update/{id}
pub async fn update(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(form): Json<ExpenseForm>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_form(&form)?;
    state.expenses.update(id, &form).await?;

    Ok(Json(json!({ "success": true, "message": "Expense updated" })))
}

/// DELETE /api/expenses/delete/{id}
pub async fn delete(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.expenses.delete(id).await?;

    Ok(Json(json!({ "success": true, "message": "Expense deleted" })))
}
