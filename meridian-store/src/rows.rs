//! Row structs shared by the Postgres repositories, plus the sqlx error
//! mapping into the repository error taxonomy.

use chrono::{DateTime, Utc};
use meridian_core::repository::RepoError;
use meridian_domain::{
    AddOn, BookedAddOn, BookedSegment, Booking, Driver, Passenger, Route, Segment, Trip, Vehicle,
};
use sqlx::types::Json;
use uuid::Uuid;

pub(crate) fn map_sqlx_err(err: sqlx::Error) -> RepoError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::DuplicateKey(db.constraint().unwrap_or("unknown").to_string())
        }
        _ => RepoError::Backend(Box::new(err)),
    }
}

/// A stored value that no longer parses into the domain model.
pub(crate) fn corrupt(msg: String) -> RepoError {
    RepoError::Backend(msg.into())
}

#[derive(sqlx::FromRow)]
pub(crate) struct RouteRow {
    pub id: Uuid,
    pub name: String,
    pub segments: Json<Vec<Segment>>,
    pub is_featured: bool,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        Route {
            id: row.id,
            name: row.name,
            segments: row.segments.0,
            is_featured: row.is_featured,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct VehicleRow {
    pub id: Uuid,
    pub name: String,
    pub plate_number: String,
    pub capacity: i32,
    pub car_type: String,
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Vehicle {
            id: row.id,
            name: row.name,
            plate_number: row.plate_number,
            capacity: row.capacity,
            car_type: row.car_type,
            amenities: row.amenities,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct DriverRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub license_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DriverRow> for Driver {
    fn from(row: DriverRow) -> Self {
        Driver {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone_number: row.phone_number,
            license_number: row.license_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct TripRow {
    pub id: Uuid,
    pub route_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub booked_seats: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TripRow> for Trip {
    type Error = RepoError;

    fn try_from(row: TripRow) -> Result<Self, Self::Error> {
        Ok(Trip {
            id: row.id,
            route_id: row.route_id,
            vehicle_id: row.vehicle_id,
            driver_id: row.driver_id,
            departure_time: row.departure_time,
            booked_seats: row.booked_seats,
            status: row.status.parse().map_err(corrupt)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct AddOnRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub icon: Option<String>,
    pub pricing_type: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<AddOnRow> for AddOn {
    type Error = RepoError;

    fn try_from(row: AddOnRow) -> Result<Self, Self::Error> {
        Ok(AddOn {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            icon: row.icon,
            pricing_type: row.pricing_type.parse().map_err(corrupt)?,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub reference: String,
    pub booked_segments: Json<Vec<BookedSegment>>,
    pub passengers: Json<Vec<Passenger>>,
    pub seat_numbers: Vec<String>,
    pub booked_add_ons: Json<Vec<BookedAddOn>>,
    pub total_cost: f64,
    pub payment_status: String,
    pub payment_ref: Option<String>,
    pub payment_method: String,
    pub marked_as_paid_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = RepoError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            trip_id: row.trip_id,
            reference: row.reference,
            booked_segments: row.booked_segments.0,
            passengers: row.passengers.0,
            seat_numbers: row.seat_numbers,
            booked_add_ons: row.booked_add_ons.0,
            total_cost: row.total_cost,
            payment_status: row.payment_status.parse().map_err(corrupt)?,
            payment_ref: row.payment_ref,
            payment_method: row.payment_method.parse().map_err(corrupt)?,
            marked_as_paid_by: row.marked_as_paid_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
