use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Scheduled,
    Departed,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Scheduled => "scheduled",
            TripStatus::Departed => "departed",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(TripStatus::Scheduled),
            "departed" => Ok(TripStatus::Departed),
            "completed" => Ok(TripStatus::Completed),
            "cancelled" => Ok(TripStatus::Cancelled),
            other => Err(format!("unknown trip status: {other}")),
        }
    }
}

/// A scheduled instance of a route bound to a vehicle and driver.
///
/// `booked_seats` is the single source of truth for seat occupancy on this
/// trip. Nothing else writes it; seats are appended only when a payment is
/// confirmed, never at intake time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub route_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub booked_seats: Vec<String>,
    pub status: TripStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// A trip accepts new bookings only while scheduled and not yet departed.
    pub fn is_bookable(&self, now: DateTime<Utc>) -> bool {
        self.status == TripStatus::Scheduled && self.departure_time > now
    }

    pub fn has_seat(&self, seat: &str) -> bool {
        self.booked_seats.iter().any(|s| s == seat)
    }

    pub fn available_capacity(&self, vehicle_capacity: i32) -> i32 {
        vehicle_capacity - self.booked_seats.len() as i32
    }

    /// Route, vehicle, and departure time are frozen once seats are sold;
    /// status and driver stay mutable.
    pub fn is_structurally_frozen(&self) -> bool {
        !self.booked_seats.is_empty()
    }
}
