use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Payload for creating or updating an expense. `amount > 0` is checked
/// at the handler.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExpenseForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub amount: Decimal,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// Operating expense record. Pure bookkeeping, no lifecycle beyond CRUD.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub amount: Decimal,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
