use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingType {
    #[serde(rename = "per-passenger")]
    PerPassenger,
    #[serde(rename = "per-booking")]
    PerBooking,
}

impl PricingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingType::PerPassenger => "per-passenger",
            PricingType::PerBooking => "per-booking",
        }
    }
}

impl std::str::FromStr for PricingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-passenger" => Ok(PricingType::PerPassenger),
            "per-booking" => Ok(PricingType::PerBooking),
            other => Err(format!("unknown pricing type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOn {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Flat amount; contributes `price` per booking or `price × passengers`
    /// depending on `pricing_type`.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub pricing_type: PricingType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
