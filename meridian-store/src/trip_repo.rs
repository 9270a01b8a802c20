use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meridian_core::repository::{Paginated, RepoResult, TripDetail, TripRepository};
use meridian_domain::{Driver, Route, Trip, Vehicle};
use sqlx::PgPool;
use uuid::Uuid;

use crate::rows::{corrupt, map_sqlx_err, DriverRow, RouteRow, TripRow, VehicleRow};

const TRIP_COLUMNS: &str =
    "id, route_id, vehicle_id, driver_id, departure_time, booked_seats, status, created_at, updated_at";

pub struct PgTripRepository {
    pool: PgPool,
}

impl PgTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Join a trip with its reference data. Foreign keys make the lookups
    /// infallible in a consistent database; a miss is surfaced as a backend
    /// error rather than silently dropping the trip.
    async fn assemble(&self, trip: Trip) -> RepoResult<TripDetail> {
        let route = sqlx::query_as::<_, RouteRow>(
            "SELECT id, name, segments, is_featured, image_url, created_at, updated_at
             FROM routes WHERE id = $1",
        )
        .bind(trip.route_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .map(Route::from)
        .ok_or_else(|| corrupt(format!("trip {} references missing route", trip.id)))?;

        let vehicle = sqlx::query_as::<_, VehicleRow>(
            "SELECT id, name, plate_number, capacity, car_type, amenities, created_at, updated_at
             FROM vehicles WHERE id = $1",
        )
        .bind(trip.vehicle_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .map(Vehicle::from)
        .ok_or_else(|| corrupt(format!("trip {} references missing vehicle", trip.id)))?;

        let driver = sqlx::query_as::<_, DriverRow>(
            "SELECT id, first_name, last_name, phone_number, license_number, created_at, updated_at
             FROM drivers WHERE id = $1",
        )
        .bind(trip.driver_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .map(Driver::from)
        .ok_or_else(|| corrupt(format!("trip {} references missing driver", trip.id)))?;

        Ok(TripDetail { trip, route, vehicle, driver })
    }
}

#[async_trait]
impl TripRepository for PgTripRepository {
    async fn create(&self, trip: &Trip) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO trips (id, route_id, vehicle_id, driver_id, departure_time, booked_seats, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(trip.id)
        .bind(trip.route_id)
        .bind(trip.vehicle_id)
        .bind(trip.driver_id)
        .bind(trip.departure_time)
        .bind(&trip.booked_seats)
        .bind(trip.status.as_str())
        .bind(trip.created_at)
        .bind(trip.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Trip>> {
        let row = sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {TRIP_COLUMNS} FROM trips WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        row.map(Trip::try_from).transpose()
    }

    async fn get_detailed(&self, id: Uuid) -> RepoResult<Option<TripDetail>> {
        match self.get(id).await? {
            Some(trip) => Ok(Some(self.assemble(trip).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<TripDetail>> {
        let rows = sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {TRIP_COLUMNS} FROM trips ORDER BY departure_time DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trips")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        let mut data = Vec::with_capacity(rows.len());
        for row in rows {
            data.push(self.assemble(Trip::try_from(row)?).await?);
        }
        Ok(Paginated { data, total_count })
    }

    async fn list_bookable(&self, now: DateTime<Utc>) -> RepoResult<Vec<TripDetail>> {
        let rows = sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {TRIP_COLUMNS} FROM trips
             WHERE status = 'scheduled' AND departure_time > $1
             ORDER BY departure_time"
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            details.push(self.assemble(Trip::try_from(row)?).await?);
        }
        Ok(details)
    }

    async fn update(&self, trip: &Trip) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE trips
             SET route_id = $2, vehicle_id = $3, driver_id = $4, departure_time = $5,
                 booked_seats = $6, status = $7, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(trip.id)
        .bind(trip.route_id)
        .bind(trip.vehicle_id)
        .bind(trip.driver_id)
        .bind(trip.departure_time)
        .bind(&trip.booked_seats)
        .bind(trip.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn append_seat_if_absent(&self, trip_id: Uuid, seat: &str) -> RepoResult<bool> {
        // Single-statement conditional append; concurrent confirmations for
        // the same seat serialize on the row and only one append lands.
        let result = sqlx::query(
            "UPDATE trips
             SET booked_seats = array_append(booked_seats, $2), updated_at = NOW()
             WHERE id = $1 AND NOT ($2 = ANY(booked_seats))",
        )
        .bind(trip_id)
        .bind(seat)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn route_has_booked_trips(&self, route_id: Uuid) -> RepoResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM trips WHERE route_id = $1 AND cardinality(booked_seats) > 0
             )",
        )
        .bind(route_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(exists)
    }
}
