use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle of a room request. `balance` is only meaningful once the
/// tenant is `approved`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "tenant_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Pending,
    Approved,
    Rejected,
}

/// Tenant profile, optionally linked to a user account.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tenant {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub address: String,
    pub emergency_contact: String,
    pub room_id: Option<Uuid>,
    pub status: TenantStatus,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Room-request payload, upserted by `user_id`. One request per account;
/// resubmitting overwrites the previous one and resets it to `pending`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RoomRequestForm {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Gender is required"))]
    pub gender: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "Emergency contact is required"))]
    pub emergency_contact: String,
    pub room_id: Uuid,
}

/// Tenant row with joined room details, as shown in the admin listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TenantListing {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub address: String,
    pub emergency_contact: String,
    pub room_number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub rate: Option<Decimal>,
    pub status: TenantStatus,
    pub created_at: DateTime<Utc>,
}

/// Pending-queue entry for the admin approval screen.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PendingTenant {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub status: TenantStatus,
    pub room_number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
}

/// A tenant's own latest room request with joined room details.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TenantRequestDetails {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub address: String,
    pub emergency_contact: String,
    pub room_id: Option<Uuid>,
    pub status: TenantStatus,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub room_number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub rate: Option<Decimal>,
}

/// Dashboard card for the tenant's own view.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TenantDashboard {
    pub id: Uuid,
    pub tenant_name: String,
    pub status: TenantStatus,
    pub room_number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub rate: Option<Decimal>,
}

/// Billing summary backing the tenant payment screen.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TenantBillingSummary {
    pub tenant_id: Uuid,
    pub balance: Decimal,
    pub room_rate: Option<Decimal>,
    pub room_number: Option<String>,
}

/// Approved tenant inside the 30-day dues window.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UpcomingDue {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub room_number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub created_at: DateTime<Utc>,
}
