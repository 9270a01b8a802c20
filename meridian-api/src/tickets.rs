use axum::{extract::State, Json};
use meridian_domain::PaymentStatus;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendTicketRequest {
    pub reference: String,
}

/// POST /v1/tickets/send
/// Re-send the ticket email for a paid booking.
pub async fn send_ticket(
    State(state): State<AppState>,
    Json(req): Json<SendTicketRequest>,
) -> Result<Json<Value>, AppError> {
    if req.reference.is_empty() {
        return Err(AppError::BadRequest("Booking reference is required".to_string()));
    }

    let booking = state
        .bookings
        .find_by_reference(&req.reference)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.payment_status != PaymentStatus::Paid {
        return Err(AppError::BadRequest(
            "Cannot send ticket for unpaid booking.".to_string(),
        ));
    }

    state
        .notifier
        .send_ticket(&req.reference)
        .await
        .map_err(|e| AppError::BadGateway(e.to_string()))?;

    Ok(Json(json!({ "message": "Ticket sent successfully" })))
}
