use axum::{extract::State, http::HeaderMap, Json};
use meridian_core::gateway::{
    verify_webhook_signature, WebhookEvent, EVENT_CHARGE_FAILED, EVENT_CHARGE_SUCCESS,
};
use meridian_core::reconcile::ConfirmationSource;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

const SIGNATURE_HEADER: &str = "x-paystack-signature";

/// POST /v1/webhooks/paystack
/// Provider push: the authoritative payment signal. The HMAC check runs
/// over the raw body before anything is parsed; a bad signature changes no
/// state.
pub async fn handle_paystack_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<Value>, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing signature".to_string()))?;

    if !verify_webhook_signature(&state.webhook_secret, body.as_bytes(), signature) {
        tracing::warn!("webhook rejected: invalid signature");
        return Err(AppError::Unauthorized("Invalid signature".to_string()));
    }

    let event: WebhookEvent = serde_json::from_str(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed webhook payload: {e}")))?;

    tracing::info!(event = %event.event, reference = %event.data.reference, "webhook received");

    match event.event.as_str() {
        EVENT_CHARGE_SUCCESS => {
            state
                .reconciler
                .confirm(
                    &event.data.reference,
                    Some(event.data.amount),
                    ConfirmationSource::Webhook,
                )
                .await?;
            Ok(Json(json!({ "message": "Webhook processed" })))
        }
        EVENT_CHARGE_FAILED => {
            state.reconciler.fail(&event.data.reference).await?;
            Ok(Json(json!({ "message": "Webhook processed" })))
        }
        _ => Ok(Json(json!({ "message": "Event not handled" }))),
    }
}
