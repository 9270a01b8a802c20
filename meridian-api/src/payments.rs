use axum::{
    extract::{Query, State},
    Json,
};
use meridian_core::reconcile::ConfirmationSource;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    pub reference: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Major currency units, as the customer saw them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

/// GET /v1/payments/verify?reference=MRD-XXXXXX
/// Redirect-time verification: the customer's browser lands here after the
/// hosted checkout. A non-success report from the provider produces a
/// failed-shaped body without touching the booking — persisting failures is
/// the webhook's job. A success report confirms the booking if the webhook
/// has not already done so.
pub async fn verify_payment(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Result<Json<VerifyResponse>, AppError> {
    let reference = query
        .reference
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::BadRequest("Payment reference is missing".to_string()))?;

    let verification = state.gateway.verify(&reference).await?;

    if !verification.success {
        return Ok(Json(VerifyResponse {
            status: "failed",
            message: verification
                .gateway_message
                .unwrap_or_else(|| "Payment not successful".to_string()),
            reference: None,
            amount: None,
            customer_email: None,
        }));
    }

    state
        .reconciler
        .confirm(&reference, None, ConfirmationSource::RedirectVerify)
        .await
        .map_err(|err| match err {
            meridian_core::reconcile::ReconcileError::BookingNotFound => {
                AppError::NotFound("Booking not found. Please contact support.".to_string())
            }
            other => other.into(),
        })?;

    Ok(Json(VerifyResponse {
        status: "success",
        message: "Payment verified successfully".to_string(),
        reference: Some(reference),
        amount: Some(verification.amount_minor as f64 / 100.0),
        customer_email: verification.customer_email,
    }))
}
