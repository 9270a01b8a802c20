use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use meridian_core::pricing;
use meridian_core::repository::TripDetail;
use meridian_domain::{Route, Segment, TripStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub id: Uuid,
    pub name: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Serialize)]
pub struct VehicleSummary {
    pub name: String,
    pub capacity: i32,
    pub amenities: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DriverSummary {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize)]
pub struct TripSummary {
    pub id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub status: TripStatus,
    pub booked_seats: Vec<String>,
    pub route: RouteSummary,
    pub vehicle: VehicleSummary,
    pub driver: DriverSummary,
}

impl From<TripDetail> for TripSummary {
    fn from(detail: TripDetail) -> Self {
        TripSummary {
            id: detail.trip.id,
            departure_time: detail.trip.departure_time,
            status: detail.trip.status,
            booked_seats: detail.trip.booked_seats,
            route: RouteSummary {
                id: detail.route.id,
                name: detail.route.name,
                segments: detail.route.segments,
            },
            vehicle: VehicleSummary {
                name: detail.vehicle.name,
                capacity: detail.vehicle.capacity,
                amenities: detail.vehicle.amenities,
            },
            driver: DriverSummary {
                first_name: detail.driver.first_name,
                last_name: detail.driver.last_name,
            },
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// GET /v1/trips/search?from=Lagos&to=Abuja
/// Bookable trips whose route serves the requested connection.
pub async fn search_trips(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<TripSummary>>, AppError> {
    let (from, to) = match (query.from, query.to) {
        (Some(from), Some(to)) if !from.is_empty() && !to.is_empty() => (from, to),
        _ => {
            return Err(AppError::BadRequest(
                "Missing 'from' or 'to' query parameters".to_string(),
            ))
        }
    };

    let trips = state.trips.list_bookable(Utc::now()).await?;
    let matching: Vec<TripSummary> = trips
        .into_iter()
        .filter(|detail| pricing::serves_connection(&detail.route.segments, &from, &to))
        .map(TripSummary::from)
        .collect();

    Ok(Json(matching))
}

/// GET /v1/locations/origins
/// Every city any route departs from, sorted.
pub async fn list_origins(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let routes = state.routes.all().await?;
    let mut origins: Vec<String> = routes.iter().flat_map(Route::origins).collect();
    origins.sort();
    origins.dedup();
    Ok(Json(origins))
}

#[derive(Debug, Deserialize)]
pub struct DestinationsQuery {
    pub from: Option<String>,
}

/// GET /v1/locations/destinations?from=Lagos
/// Cities reachable from `from` across all routes, sorted.
pub async fn list_destinations(
    State(state): State<AppState>,
    Query(query): Query<DestinationsQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let from = query
        .from
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing 'from' query parameter".to_string()))?;

    let routes = state.routes.all().await?;
    let mut destinations: Vec<String> = routes
        .iter()
        .flat_map(|route| pricing::reachable_destinations(&route.segments, &from))
        .collect();
    destinations.sort();
    destinations.dedup();
    Ok(Json(destinations))
}

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<i64>,
}

/// GET /v1/routes/featured?limit=6
pub async fn featured_routes(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> Result<Json<Vec<Route>>, AppError> {
    let limit = query.limit.unwrap_or(6).clamp(1, 50);
    let routes = state.routes.list_featured(limit).await?;
    Ok(Json(routes))
}
