use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// How the tenant paid. Wire format keeps the display casing used by the
/// client ("Cash" / "GCash").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
pub enum PaymentMethod {
    #[serde(rename = "Cash")]
    Cash,
    #[serde(rename = "GCash")]
    Gcash,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Full,
    Partial,
}

/// Payment lifecycle. `paid` and `rejected` are terminal; no further
/// transitions are permitted once either is reached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Rejected,
}

impl PaymentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Rejected)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Partial => write!(f, "partial"),
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Payment entity as stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub receipt_path: Option<String>,
    pub payment_type: PaymentType,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Admin view: payment joined with its tenant and room.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PaymentListing {
    pub id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub receipt_path: Option<String>,
    pub status: PaymentStatus,
    pub payment_type: PaymentType,
    pub created_at: DateTime<Utc>,
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub room_number: Option<String>,
    pub room_rate: Option<Decimal>,
    pub balance: Decimal,
}

/// Outcome of an approved payment: the new payment status and the
/// tenant's settled balance.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentApproval {
    pub status: PaymentStatus,
    pub balance: Decimal,
}

/// Per-status slice of the revenue report.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RevenueSlice {
    pub status: PaymentStatus,
    pub total: Decimal,
    pub count: i64,
}

/// Revenue aggregation over an optional period. `total`/`count` cover
/// adjudicated payments (`paid` + `partial`); the breakdown lists every
/// status present.
#[derive(Debug, Clone, Serialize)]
pub struct RevenueReport {
    pub total: Decimal,
    pub count: i64,
    pub breakdown: Vec<RevenueSlice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(PaymentStatus::Paid.is_terminal());
        assert!(PaymentStatus::Rejected.is_terminal());
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(!PaymentStatus::Partial.is_terminal());
    }

    #[test]
    fn method_keeps_display_casing_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Gcash).unwrap(),
            "\"GCash\""
        );
        let parsed: PaymentMethod = serde_json::from_str("\"Cash\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Cash);
    }

    #[test]
    fn status_displays_lowercase() {
        assert_eq!(PaymentStatus::Paid.to_string(), "paid");
        assert_eq!(PaymentStatus::Partial.to_string(), "partial");
    }
}
