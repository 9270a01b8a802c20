use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use meridian_domain::{Trip, TripStatus};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::pagination::{envelope, PageEnvelope, PageQuery};
use crate::search::TripSummary;
use crate::state::AppState;

/// GET /v1/trips/{id}
/// Public trip detail for the booking page; only scheduled trips are
/// exposed.
pub async fn get_public_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripSummary>, AppError> {
    let detail = state
        .trips
        .get_detailed(id)
        .await?
        .filter(|d| d.trip.status == TripStatus::Scheduled)
        .ok_or_else(|| {
            AppError::NotFound("Trip not found or is no longer available".to_string())
        })?;

    Ok(Json(TripSummary::from(detail)))
}

// ============================================================================
// Admin Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub route_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub status: Option<TripStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTripRequest {
    pub route_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub status: TripStatus,
    pub booked_seats: Option<Vec<String>>,
}

/// POST /v1/admin/trips
pub async fn create_trip(
    State(state): State<AppState>,
    Json(req): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<Trip>), AppError> {
    if state.routes.get(req.route_id).await?.is_none() {
        return Err(AppError::BadRequest("Route not found".to_string()));
    }
    if state.vehicles.get(req.vehicle_id).await?.is_none() {
        return Err(AppError::BadRequest("Vehicle not found".to_string()));
    }
    if state.drivers.get(req.driver_id).await?.is_none() {
        return Err(AppError::BadRequest("Driver not found".to_string()));
    }

    let now = Utc::now();
    let trip = Trip {
        id: Uuid::new_v4(),
        route_id: req.route_id,
        vehicle_id: req.vehicle_id,
        driver_id: req.driver_id,
        departure_time: req.departure_time,
        booked_seats: Vec::new(),
        status: req.status.unwrap_or(TripStatus::Scheduled),
        created_at: now,
        updated_at: now,
    };
    state.trips.create(&trip).await?;

    Ok((StatusCode::CREATED, Json(trip)))
}

/// GET /v1/admin/trips
pub async fn list_trips(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageEnvelope<TripSummary>>, AppError> {
    let page = state.trips.list(query.offset(), query.limit()).await?;
    let page = meridian_core::repository::Paginated {
        data: page.data.into_iter().map(TripSummary::from).collect(),
        total_count: page.total_count,
    };
    Ok(Json(envelope(page, &query)))
}

/// PUT /v1/admin/trips/{id}
/// Route, vehicle, and departure time are frozen once the trip has sold
/// seats; only status and driver stay editable then.
pub async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTripRequest>,
) -> Result<Json<Trip>, AppError> {
    let trip = state
        .trips
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

    if trip.is_structurally_frozen()
        && (trip.route_id != req.route_id
            || trip.vehicle_id != req.vehicle_id
            || trip.departure_time != req.departure_time)
    {
        return Err(AppError::Conflict(
            "Cannot change route, vehicle, or departure time for a trip with existing bookings. \
             You can only change the status or driver."
                .to_string(),
        ));
    }

    let updated = Trip {
        route_id: req.route_id,
        vehicle_id: req.vehicle_id,
        driver_id: req.driver_id,
        departure_time: req.departure_time,
        status: req.status,
        booked_seats: req.booked_seats.unwrap_or(trip.booked_seats),
        updated_at: Utc::now(),
        ..trip
    };
    state.trips.update(&updated).await?;

    Ok(Json(updated))
}

/// DELETE /v1/admin/trips/{id}
pub async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(trip) = state.trips.get(id).await? {
        if !trip.booked_seats.is_empty() {
            return Err(AppError::Conflict(
                "Cannot delete a trip with existing bookings. Please cancel it instead."
                    .to_string(),
            ));
        }
    }

    if !state.trips.delete(id).await? {
        return Err(AppError::NotFound("Trip not found".to_string()));
    }

    Ok(Json(json!({ "message": "Trip deleted successfully" })))
}
