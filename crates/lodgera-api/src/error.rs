//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Use
//! `AppError` (or types that implement `Into<AppError>`) for errors so they become
//! `HttpAppError` and render consistently (status, body, logging).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lodgera_core::{
    error::{AssignmentError, PaymentDecisionError},
    AppError, ErrorMetadata, LogLevel,
};
use serde::Serialize;

/// JSON body returned for every failed request. Clients match on the
/// status code and `message`; `code` is the machine-readable variant.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from lodgera-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<AssignmentError> for HttpAppError {
    fn from(err: AssignmentError) -> Self {
        let app = match err {
            AssignmentError::RoomNotFound => AppError::NotFound("Room not found".to_string()),
            AssignmentError::TenantNotFound => AppError::NotFound("Tenant not found".to_string()),
            AssignmentError::RoomFull => AppError::Conflict("Room is already full".to_string()),
            AssignmentError::App(app) => app,
        };
        HttpAppError(app)
    }
}

impl From<PaymentDecisionError> for HttpAppError {
    fn from(err: PaymentDecisionError) -> Self {
        let app = match err {
            PaymentDecisionError::NotFound => AppError::NotFound("Payment not found".to_string()),
            PaymentDecisionError::AlreadyFinalized(_) | PaymentDecisionError::AlreadyApplied => {
                AppError::Conflict(err.to_string())
            }
            PaymentDecisionError::App(app) => app,
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            message: app_error.client_message(),
            code: app_error.error_code().to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodgera_core::models::PaymentStatus;

    #[test]
    fn test_from_assignment_error_room_full() {
        let HttpAppError(app) = AssignmentError::RoomFull.into();
        match app {
            AppError::Conflict(msg) => assert_eq!(msg, "Room is already full"),
            _ => panic!("Expected Conflict variant"),
        }
    }

    #[test]
    fn test_from_payment_error_already_finalized() {
        let HttpAppError(app) = PaymentDecisionError::AlreadyFinalized(PaymentStatus::Paid).into();
        match app {
            AppError::Conflict(msg) => assert_eq!(msg, "Payment already paid"),
            _ => panic!("Expected Conflict variant"),
        }
    }

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            message: "Payment not found".to_string(),
            code: "NOT_FOUND".to_string(),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["message"], "Payment not found");
        assert_eq!(json["code"], "NOT_FOUND");
    }
}
