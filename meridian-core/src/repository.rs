use async_trait::async_trait;
use meridian_domain::{AddOn, Booking, Driver, Route, Trip, Vehicle};
use uuid::Uuid;

/// Errors surfaced by the persistence layer. Unique-constraint violations
/// are distinguished so callers can treat them as conflicts (or retry with
/// a fresh booking reference) instead of opaque failures.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("duplicate value for unique field: {0}")]
    DuplicateKey(String),

    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type RepoResult<T> = Result<T, RepoError>;

/// A page of results plus the unpaged total, for list endpoints.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total_count: i64,
}

/// A trip joined with the reference data handlers need alongside it.
#[derive(Debug, Clone)]
pub struct TripDetail {
    pub trip: Trip,
    pub route: Route,
    pub vehicle: Vehicle,
    pub driver: Driver,
}

#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn create(&self, route: &Route) -> RepoResult<()>;

    async fn get(&self, id: Uuid) -> RepoResult<Option<Route>>;

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<Route>>;

    /// Every route, for location/connection lookups.
    async fn all(&self) -> RepoResult<Vec<Route>>;

    async fn list_featured(&self, limit: i64) -> RepoResult<Vec<Route>>;

    /// Full-document update; `false` when the route does not exist.
    async fn update(&self, route: &Route) -> RepoResult<bool>;

    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: &Vehicle) -> RepoResult<()>;

    async fn get(&self, id: Uuid) -> RepoResult<Option<Vehicle>>;

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<Vehicle>>;

    async fn update(&self, vehicle: &Vehicle) -> RepoResult<bool>;

    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

#[async_trait]
pub trait DriverRepository: Send + Sync {
    async fn create(&self, driver: &Driver) -> RepoResult<()>;

    async fn get(&self, id: Uuid) -> RepoResult<Option<Driver>>;

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<Driver>>;

    async fn update(&self, driver: &Driver) -> RepoResult<bool>;

    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

#[async_trait]
pub trait AddOnRepository: Send + Sync {
    async fn create(&self, add_on: &AddOn) -> RepoResult<()>;

    async fn get(&self, id: Uuid) -> RepoResult<Option<AddOn>>;

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<AddOn>>;

    /// Only the referenced add-ons that are currently active; inactive or
    /// unknown ids are silently absent from the result.
    async fn find_active(&self, ids: &[Uuid]) -> RepoResult<Vec<AddOn>>;

    async fn update(&self, add_on: &AddOn) -> RepoResult<bool>;

    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn create(&self, trip: &Trip) -> RepoResult<()>;

    async fn get(&self, id: Uuid) -> RepoResult<Option<Trip>>;

    /// Trip joined with its route, vehicle, and driver.
    async fn get_detailed(&self, id: Uuid) -> RepoResult<Option<TripDetail>>;

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<TripDetail>>;

    /// Scheduled trips departing after `now`, the searchable inventory.
    async fn list_bookable(&self, now: chrono::DateTime<chrono::Utc>)
        -> RepoResult<Vec<TripDetail>>;

    async fn update(&self, trip: &Trip) -> RepoResult<bool>;

    async fn delete(&self, id: Uuid) -> RepoResult<bool>;

    /// Atomic conditional append: adds `seat` to `booked_seats` only if not
    /// already present. Returns whether this call appended it. This is the
    /// primitive that keeps concurrent payment confirmations from
    /// double-committing a seat.
    async fn append_seat_if_absent(&self, trip_id: Uuid, seat: &str) -> RepoResult<bool>;

    /// Whether any trip referencing this route has sold seats. Routes in
    /// that state are structurally immutable.
    async fn route_has_booked_trips(&self, route_id: Uuid) -> RepoResult<bool>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// `DuplicateKey` when the reference is already taken.
    async fn create(&self, booking: &Booking) -> RepoResult<()>;

    async fn get(&self, id: Uuid) -> RepoResult<Option<Booking>>;

    async fn find_by_reference(&self, reference: &str) -> RepoResult<Option<Booking>>;

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<Booking>>;

    /// Up to `limit` most recent paid bookings whose reference, passenger
    /// email, or passenger phone number equals `identifier`.
    async fn search_paid(&self, identifier: &str, limit: i64) -> RepoResult<Vec<Booking>>;

    /// Compensating delete for a pending booking whose payment
    /// initialization failed.
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;

    /// Atomic `pending → paid` transition, recording the provider payment
    /// reference. Returns whether this call won the transition.
    async fn mark_paid_if_pending(&self, reference: &str, payment_ref: &str) -> RepoResult<bool>;

    /// Atomic `pending → failed` transition.
    async fn mark_failed_if_pending(&self, reference: &str) -> RepoResult<bool>;

    /// Atomic manual confirmation: `pending → paid` with
    /// `payment_method = manual` and the confirming admin recorded.
    async fn mark_paid_manual(&self, id: Uuid, admin_id: Uuid) -> RepoResult<bool>;

    /// Cancel from any non-cancelled state. Returns whether a row changed.
    async fn cancel(&self, id: Uuid) -> RepoResult<bool>;
}
