use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Road,
    Air,
}

/// One directed leg of a route. Consecutive segments usually chain
/// (destination of one feeds the origin of the next) but nothing enforces
/// it; lookups only search for origin/destination occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub origin: String,
    pub destination: String,
    pub cost: f64,
    pub mode: TransportMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_estimate: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub segments: Vec<Segment>,
    pub is_featured: bool,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Route {
    /// Sorted, de-duplicated list of every city this route departs from.
    pub fn origins(&self) -> Vec<String> {
        let mut names: Vec<String> = self.segments.iter().map(|s| s.origin.clone()).collect();
        names.sort();
        names.dedup();
        names
    }
}
