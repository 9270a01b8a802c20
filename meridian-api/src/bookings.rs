use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use meridian_core::intake::{IntakeOutcome, IntakeRequest};
use meridian_domain::{BookedSegment, Booking, Passenger};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AdminClaims;
use crate::error::AppError;
use crate::pagination::{envelope, PageEnvelope, PageQuery};
use crate::state::AppState;

// ============================================================================
// Public Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub trip_id: Uuid,
    pub passengers: Vec<Passenger>,
    pub booked_segments: Vec<BookedSegment>,
    #[serde(default)]
    pub seat_numbers: Vec<String>,
    #[serde(default)]
    pub add_on_ids: Vec<Uuid>,
    pub total_cost: f64,
}

#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    pub reference: String,
    pub checkout_url: String,
}

/// POST /v1/bookings
/// Booking intake: validate against current inventory, persist a pending
/// booking, and hand back the provider checkout URL.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    let IntakeOutcome { reference, checkout_url } = state
        .intake
        .submit(IntakeRequest {
            trip_id: req.trip_id,
            passengers: req.passengers,
            booked_segments: req.booked_segments,
            seat_numbers: req.seat_numbers,
            add_on_ids: req.add_on_ids,
            client_total: req.total_cost,
        })
        .await?;

    Ok(Json(CreateBookingResponse { reference, checkout_url }))
}

#[derive(Debug, Deserialize)]
pub struct FindBookingsRequest {
    pub identifier: String,
}

/// POST /v1/bookings/find
/// Self-service lookup: paid bookings matched by reference, passenger
/// email, or passenger phone number.
pub async fn find_bookings(
    State(state): State<AppState>,
    Json(req): Json<FindBookingsRequest>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let identifier = req.identifier.trim();
    if identifier.is_empty() {
        return Err(AppError::BadRequest("Search identifier is required".to_string()));
    }

    let bookings = state.bookings.search_paid(identifier, 10).await?;
    if bookings.is_empty() {
        return Err(AppError::NotFound("No matching bookings found.".to_string()));
    }

    Ok(Json(bookings))
}

// ============================================================================
// Admin Handlers
// ============================================================================

/// GET /v1/admin/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageEnvelope<Booking>>, AppError> {
    let page = state.bookings.list(query.offset(), query.limit()).await?;
    Ok(Json(envelope(page, &query)))
}

/// GET /v1/admin/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .bookings
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
    Ok(Json(booking))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingRequest {
    pub status: String,
}

/// PUT /v1/admin/bookings/{id}
/// Manual override: confirm a pending booking as paid (recording the
/// confirming admin) or cancel it.
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(claims): Extension<AdminClaims>,
    Json(req): Json<UpdateBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    match req.status.as_str() {
        "paid" => {
            let admin_id = claims
                .sub
                .parse::<Uuid>()
                .map_err(|_| AppError::Unauthorized("Invalid admin identity".to_string()))?;
            state.reconciler.mark_paid_manual(id, admin_id).await?;
        }
        "cancelled" => {
            state.reconciler.cancel(id).await?;
        }
        _ => return Err(AppError::BadRequest("Invalid status".to_string())),
    }

    let booking = state
        .bookings
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
    Ok(Json(booking))
}
