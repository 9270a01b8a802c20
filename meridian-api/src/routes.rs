use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use meridian_domain::{Route, Segment};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::pagination::{envelope, PageEnvelope, PageQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RoutePayload {
    pub name: String,
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub is_featured: bool,
    pub image_url: String,
}

fn validate_payload(req: &RoutePayload) -> Result<(), AppError> {
    if req.name.is_empty() || req.image_url.is_empty() || req.segments.is_empty() {
        return Err(AppError::BadRequest(
            "Missing required fields or empty segments".to_string(),
        ));
    }
    for segment in &req.segments {
        if segment.origin.is_empty() || segment.destination.is_empty() || segment.cost < 0.0 {
            return Err(AppError::BadRequest("Invalid segment data".to_string()));
        }
    }
    Ok(())
}

/// Routes in use by trips with sold seats are structurally immutable —
/// editing them would silently invalidate the inventory already sold.
async fn ensure_not_in_booked_use(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if state.trips.route_has_booked_trips(id).await? {
        return Err(AppError::Conflict(
            "Cannot modify a route referenced by trips with existing bookings".to_string(),
        ));
    }
    Ok(())
}

/// POST /v1/admin/routes
pub async fn create_route(
    State(state): State<AppState>,
    Json(req): Json<RoutePayload>,
) -> Result<(StatusCode, Json<Route>), AppError> {
    validate_payload(&req)?;

    let now = Utc::now();
    let route = Route {
        id: Uuid::new_v4(),
        name: req.name,
        segments: req.segments,
        is_featured: req.is_featured,
        image_url: req.image_url,
        created_at: now,
        updated_at: now,
    };
    state.routes.create(&route).await?;

    Ok((StatusCode::CREATED, Json(route)))
}

/// GET /v1/admin/routes
pub async fn list_routes(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageEnvelope<Route>>, AppError> {
    let page = state.routes.list(query.offset(), query.limit()).await?;
    Ok(Json(envelope(page, &query)))
}

/// GET /v1/admin/routes/{id}
pub async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Route>, AppError> {
    let route = state
        .routes
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;
    Ok(Json(route))
}

/// PUT /v1/admin/routes/{id}
pub async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RoutePayload>,
) -> Result<Json<Route>, AppError> {
    validate_payload(&req)?;
    ensure_not_in_booked_use(&state, id).await?;

    let existing = state
        .routes
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

    let route = Route {
        name: req.name,
        segments: req.segments,
        is_featured: req.is_featured,
        image_url: req.image_url,
        updated_at: Utc::now(),
        ..existing
    };
    state.routes.update(&route).await?;

    Ok(Json(route))
}

/// DELETE /v1/admin/routes/{id}
pub async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    ensure_not_in_booked_use(&state, id).await?;

    if !state.routes.delete(id).await? {
        return Err(AppError::NotFound("Route not found".to_string()));
    }

    Ok(Json(json!({ "message": "Route deleted successfully" })))
}
