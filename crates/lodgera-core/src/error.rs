//! Error types module
//!
//! All failures are unified under the `AppError` enum, which maps each
//! variant to an HTTP status, a machine-readable code, a client-facing
//! message, and a log level via the `ErrorMetadata` trait. Business
//! operations with richer failure payloads (tenant approval, room
//! assignment, payment adjudication) have their own enums here and
//! degrade into `AppError` where no extra payload is needed.

use crate::models::{PaymentStatus, RoomSuggestion};

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors such as validation failures
    Debug,
    /// Recoverable or suspicious conditions
    Warn,
    /// Unexpected failures
    Error,
}

/// Metadata describing how an error is presented over HTTP.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g. "NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("UUID parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata per variant: (http_status, error_code, sensitive, log_level).
fn static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::Database(_) => (500, "DATABASE_ERROR", true, LogLevel::Error),
        AppError::NotFound(_) => (404, "NOT_FOUND", false, LogLevel::Debug),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, LogLevel::Debug),
        AppError::Conflict(_) => (400, "CONFLICT", false, LogLevel::Debug),
        AppError::Unauthorized(_) => (401, "UNAUTHORIZED", false, LogLevel::Debug),
        AppError::Forbidden(_) => (403, "FORBIDDEN", false, LogLevel::Debug),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Server error".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Server error".to_string()
            }
            AppError::NotFound(msg)
            | AppError::InvalidInput(msg)
            | AppError::Conflict(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg) => msg.clone(),
        }
    }
}

/// Failure modes of the tenant-approval command.
///
/// `RoomFull` carries the alternative-room suggestions so the API can put
/// them in the response body; every other variant maps to a plain
/// `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    #[error("Tenant not found")]
    TenantNotFound,

    #[error("Tenant has no assigned room")]
    NoRoomAssigned,

    #[error("Room not found")]
    RoomNotFound,

    #[error("Room is already full. Please assign another room.")]
    RoomFull { available_rooms: Vec<RoomSuggestion> },

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<sqlx::Error> for ApprovalError {
    fn from(err: sqlx::Error) -> Self {
        ApprovalError::App(AppError::Database(err))
    }
}

/// Failure modes of the direct room-assignment command.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Tenant not found")]
    TenantNotFound,

    #[error("Room is already full")]
    RoomFull,

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<sqlx::Error> for AssignmentError {
    fn from(err: sqlx::Error) -> Self {
        AssignmentError::App(AppError::Database(err))
    }
}

/// Failure modes of payment approval/rejection.
#[derive(Debug, thiserror::Error)]
pub enum PaymentDecisionError {
    #[error("Payment not found")]
    NotFound,

    /// The payment already reached a terminal status (`paid`/`rejected`).
    #[error("Payment already {0}")]
    AlreadyFinalized(PaymentStatus),

    /// Rejection of a `partial` payment is refused: its amount has
    /// already been deducted from the tenant balance and there are no
    /// reversal semantics.
    #[error("Payment has already been applied to the balance and cannot be rejected")]
    AlreadyApplied,

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<sqlx::Error> for PaymentDecisionError {
    fn from(err: sqlx::Error) -> Self {
        PaymentDecisionError::App(AppError::Database(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_database() {
        let err = AppError::from(sqlx::Error::PoolClosed);
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert_eq!(err.client_message(), "Server error");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("Tenant not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.client_message(), "Tenant not found");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_conflict_maps_to_400() {
        let err = AppError::Conflict("Email already registered.".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[test]
    fn test_auth_errors_statuses() {
        assert_eq!(
            AppError::Unauthorized("Invalid token".to_string()).http_status_code(),
            401
        );
        assert_eq!(
            AppError::Forbidden("Forbidden".to_string()).http_status_code(),
            403
        );
    }

    #[test]
    fn test_already_finalized_message_contains_status() {
        let err = PaymentDecisionError::AlreadyFinalized(PaymentStatus::Paid);
        assert_eq!(err.to_string(), "Payment already paid");
        let err = PaymentDecisionError::AlreadyFinalized(PaymentStatus::Rejected);
        assert_eq!(err.to_string(), "Payment already rejected");
    }
}
