use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use meridian_domain::Vehicle;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::pagination::{envelope, PageEnvelope, PageQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VehiclePayload {
    pub name: String,
    pub plate_number: String,
    pub capacity: i32,
    pub car_type: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}

fn validate_payload(req: &VehiclePayload) -> Result<(), AppError> {
    if req.name.is_empty() || req.plate_number.is_empty() || req.car_type.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }
    if req.capacity <= 0 {
        return Err(AppError::BadRequest("Capacity must be positive".to_string()));
    }
    Ok(())
}

/// POST /v1/admin/vehicles
pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(req): Json<VehiclePayload>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    validate_payload(&req)?;

    let now = Utc::now();
    let vehicle = Vehicle {
        id: Uuid::new_v4(),
        name: req.name,
        plate_number: req.plate_number,
        capacity: req.capacity,
        car_type: req.car_type,
        amenities: req.amenities,
        created_at: now,
        updated_at: now,
    };
    state.vehicles.create(&vehicle).await?;

    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// GET /v1/admin/vehicles
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageEnvelope<Vehicle>>, AppError> {
    let page = state.vehicles.list(query.offset(), query.limit()).await?;
    Ok(Json(envelope(page, &query)))
}

/// GET /v1/admin/vehicles/{id}
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state
        .vehicles
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
    Ok(Json(vehicle))
}

/// PUT /v1/admin/vehicles/{id}
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<VehiclePayload>,
) -> Result<Json<Vehicle>, AppError> {
    validate_payload(&req)?;

    let existing = state
        .vehicles
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    let vehicle = Vehicle {
        name: req.name,
        plate_number: req.plate_number,
        capacity: req.capacity,
        car_type: req.car_type,
        amenities: req.amenities,
        updated_at: Utc::now(),
        ..existing
    };
    state.vehicles.update(&vehicle).await?;

    Ok(Json(vehicle))
}

/// DELETE /v1/admin/vehicles/{id}
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.vehicles.delete(id).await? {
        return Err(AppError::NotFound("Vehicle not found".to_string()));
    }
    Ok(Json(json!({ "message": "Vehicle deleted successfully" })))
}
