use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    /// Registration plate, unique across the fleet.
    pub plate_number: String,
    /// Hard ceiling for simultaneous passengers on any trip using this vehicle.
    pub capacity: i32,
    pub car_type: String,
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
