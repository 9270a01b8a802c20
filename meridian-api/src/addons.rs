use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use meridian_domain::{AddOn, PricingType};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::pagination::{envelope, PageEnvelope, PageQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddOnPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub icon: Option<String>,
    pub pricing_type: PricingType,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

fn validate_payload(req: &AddOnPayload) -> Result<(), AppError> {
    if req.name.is_empty() || req.description.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }
    if req.price < 0.0 {
        return Err(AppError::BadRequest("Price cannot be negative".to_string()));
    }
    Ok(())
}

/// POST /v1/admin/add-ons
pub async fn create_add_on(
    State(state): State<AppState>,
    Json(req): Json<AddOnPayload>,
) -> Result<(StatusCode, Json<AddOn>), AppError> {
    validate_payload(&req)?;

    let now = Utc::now();
    let add_on = AddOn {
        id: Uuid::new_v4(),
        name: req.name,
        description: req.description,
        price: req.price,
        icon: req.icon,
        pricing_type: req.pricing_type,
        is_active: req.is_active,
        created_at: now,
        updated_at: now,
    };
    state.add_ons.create(&add_on).await?;

    Ok((StatusCode::CREATED, Json(add_on)))
}

/// GET /v1/admin/add-ons
pub async fn list_add_ons(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageEnvelope<AddOn>>, AppError> {
    let page = state.add_ons.list(query.offset(), query.limit()).await?;
    Ok(Json(envelope(page, &query)))
}

/// GET /v1/admin/add-ons/{id}
pub async fn get_add_on(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AddOn>, AppError> {
    let add_on = state
        .add_ons
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Add-on not found".to_string()))?;
    Ok(Json(add_on))
}

/// PUT /v1/admin/add-ons/{id}
/// Price edits never touch existing bookings; they carry their own
/// denormalized snapshot.
pub async fn update_add_on(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddOnPayload>,
) -> Result<Json<AddOn>, AppError> {
    validate_payload(&req)?;

    let existing = state
        .add_ons
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Add-on not found".to_string()))?;

    let add_on = AddOn {
        name: req.name,
        description: req.description,
        price: req.price,
        icon: req.icon,
        pricing_type: req.pricing_type,
        is_active: req.is_active,
        updated_at: Utc::now(),
        ..existing
    };
    state.add_ons.update(&add_on).await?;

    Ok(Json(add_on))
}

/// DELETE /v1/admin/add-ons/{id}
pub async fn delete_add_on(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.add_ons.delete(id).await? {
        return Err(AppError::NotFound("Add-on not found".to_string()));
    }
    Ok(Json(json!({ "message": "Add-on deleted successfully" })))
}
