//! Tenant-side payment submission and history.

use crate::auth::models::TenantUser;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use lodgera_core::{
    models::{PaymentMethod, PaymentType},
    AppError,
};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;

/// POST /api/payments/add (multipart: amount, method, payment_type,
/// optional receipt file)
///
/// Submission only records the claim with `status = pending`; the
/// tenant's balance moves when an admin approves it.
pub async fn add(
    tenant: TenantUser,
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut amount: Option<Decimal> = None;
    let mut method = PaymentMethod::Cash;
    let mut payment_type = PaymentType::Partial;
    let mut receipt_path: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("amount") => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| AppError::InvalidInput("Invalid amount".to_string()))?;
                amount = Decimal::from_str(text.trim()).ok();
            }
            Some("method") => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| AppError::InvalidInput("Invalid method".to_string()))?;
                method = parse_method(&text);
            }
            Some("payment_type") => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| AppError::InvalidInput("Invalid payment type".to_string()))?;
                payment_type = parse_payment_type(&text);
            }
            Some("receipt") => {
                let filename = field.file_name().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Invalid receipt upload: {}", e)))?;
                if !bytes.is_empty() {
                    receipt_path = Some(state.receipts.save(filename.as_deref(), &bytes).await?);
                }
            }
            _ => {}
        }
    }

    let amount = amount
        .filter(|a| *a > Decimal::ZERO)
        .ok_or_else(|| AppError::InvalidInput("Invalid amount".to_string()))?;

    let tenant_id = state
        .tenants
        .id_for_user(tenant.0.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tenant not found".to_string()))?;

    let payment = state
        .payments
        .submit(tenant_id, amount, method, payment_type, receipt_path.as_deref())
        .await?;

    Ok(Json(json!({
        "message": "Payment submitted",
        "paymentId": payment.id,
        "status": payment.status,
    })))
}

/// GET /api/payments/my-payments
pub async fn my_payments(
    tenant: TenantUser,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let billing = state
        .tenants
        .billing_summary(tenant.0.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tenant not found".to_string()))?;

    let payments = state.payments.list_for_tenant(billing.tenant_id).await?;

    Ok(Json(json!({
        "tenant": billing,
        "payments": payments,
    })))
}

fn parse_method(text: &str) -> PaymentMethod {
    if text.trim().eq_ignore_ascii_case("gcash") {
        PaymentMethod::Gcash
    } else {
        PaymentMethod::Cash
    }
}

fn parse_payment_type(text: &str) -> PaymentType {
    if text.trim().eq_ignore_ascii_case("full") {
        PaymentType::Full
    } else {
        PaymentType::Partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parsing_defaults_to_cash() {
        assert_eq!(parse_method("GCash"), PaymentMethod::Gcash);
        assert_eq!(parse_method("gcash"), PaymentMethod::Gcash);
        assert_eq!(parse_method("Cash"), PaymentMethod::Cash);
        assert_eq!(parse_method("wire transfer"), PaymentMethod::Cash);
    }

    #[test]
    fn payment_type_parsing_defaults_to_partial() {
        assert_eq!(parse_payment_type("full"), PaymentType::Full);
        assert_eq!(parse_payment_type("Full"), PaymentType::Full);
        assert_eq!(parse_payment_type(""), PaymentType::Partial);
        assert_eq!(parse_payment_type("partial"), PaymentType::Partial);
    }
}
