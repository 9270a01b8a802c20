use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use meridian_domain::Driver;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::pagination::{envelope, PageEnvelope, PageQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DriverPayload {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub license_number: String,
}

fn validate_payload(req: &DriverPayload) -> Result<(), AppError> {
    if req.first_name.is_empty()
        || req.last_name.is_empty()
        || req.phone_number.is_empty()
        || req.license_number.is_empty()
    {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }
    Ok(())
}

/// POST /v1/admin/drivers
pub async fn create_driver(
    State(state): State<AppState>,
    Json(req): Json<DriverPayload>,
) -> Result<(StatusCode, Json<Driver>), AppError> {
    validate_payload(&req)?;

    let now = Utc::now();
    let driver = Driver {
        id: Uuid::new_v4(),
        first_name: req.first_name,
        last_name: req.last_name,
        phone_number: req.phone_number,
        license_number: req.license_number,
        created_at: now,
        updated_at: now,
    };
    state.drivers.create(&driver).await?;

    Ok((StatusCode::CREATED, Json(driver)))
}

/// GET /v1/admin/drivers
pub async fn list_drivers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageEnvelope<Driver>>, AppError> {
    let page = state.drivers.list(query.offset(), query.limit()).await?;
    Ok(Json(envelope(page, &query)))
}

/// GET /v1/admin/drivers/{id}
pub async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Driver>, AppError> {
    let driver = state
        .drivers
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Driver not found".to_string()))?;
    Ok(Json(driver))
}

/// PUT /v1/admin/drivers/{id}
pub async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DriverPayload>,
) -> Result<Json<Driver>, AppError> {
    validate_payload(&req)?;

    let existing = state
        .drivers
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Driver not found".to_string()))?;

    let driver = Driver {
        first_name: req.first_name,
        last_name: req.last_name,
        phone_number: req.phone_number,
        license_number: req.license_number,
        updated_at: Utc::now(),
        ..existing
    };
    state.drivers.update(&driver).await?;

    Ok(Json(driver))
}

/// DELETE /v1/admin/drivers/{id}
pub async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.drivers.delete(id).await? {
        return Err(AppError::NotFound("Driver not found".to_string()));
    }
    Ok(Json(json!({ "message": "Driver deleted successfully" })))
}
