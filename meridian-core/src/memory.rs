//! In-memory store implementing every repository trait, mirroring the
//! Postgres behavior closely enough for the intake/reconciliation test
//! suites: unique-key enforcement, conditional (CAS) updates, and the
//! atomic seat append.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meridian_domain::{
    AddOn, Booking, Driver, PaymentMethod, PaymentStatus, Route, Trip, TripStatus, Vehicle,
};
use uuid::Uuid;

use crate::repository::{
    AddOnRepository, BookingRepository, DriverRepository, Paginated, RepoError, RepoResult,
    RouteRepository, TripDetail, TripRepository, VehicleRepository,
};

#[derive(Default)]
struct Inner {
    routes: HashMap<Uuid, Route>,
    vehicles: HashMap<Uuid, Vehicle>,
    drivers: HashMap<Uuid, Driver>,
    trips: HashMap<Uuid, Trip>,
    add_ons: HashMap<Uuid, AddOn>,
    bookings: HashMap<Uuid, Booking>,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("store mutex poisoned")
    }

    fn detail(inner: &Inner, trip: &Trip) -> Option<TripDetail> {
        Some(TripDetail {
            trip: trip.clone(),
            route: inner.routes.get(&trip.route_id)?.clone(),
            vehicle: inner.vehicles.get(&trip.vehicle_id)?.clone(),
            driver: inner.drivers.get(&trip.driver_id)?.clone(),
        })
    }
}

fn paginate<T: Clone>(mut items: Vec<T>, offset: i64, limit: i64) -> Paginated<T> {
    let total_count = items.len() as i64;
    let start = (offset.max(0) as usize).min(items.len());
    let end = (start + limit.max(0) as usize).min(items.len());
    items = items[start..end].to_vec();
    Paginated { data: items, total_count }
}

#[async_trait]
impl RouteRepository for InMemoryStore {
    async fn create(&self, route: &Route) -> RepoResult<()> {
        let mut inner = self.lock();
        if inner.routes.values().any(|r| r.name == route.name) {
            return Err(RepoError::DuplicateKey("routes.name".to_string()));
        }
        inner.routes.insert(route.id, route.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Route>> {
        Ok(self.lock().routes.get(&id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<Route>> {
        let mut routes: Vec<Route> = self.lock().routes.values().cloned().collect();
        routes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(routes, offset, limit))
    }

    async fn all(&self) -> RepoResult<Vec<Route>> {
        Ok(self.lock().routes.values().cloned().collect())
    }

    async fn list_featured(&self, limit: i64) -> RepoResult<Vec<Route>> {
        let mut routes: Vec<Route> =
            self.lock().routes.values().filter(|r| r.is_featured).cloned().collect();
        routes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        routes.truncate(limit.max(0) as usize);
        Ok(routes)
    }

    async fn update(&self, route: &Route) -> RepoResult<bool> {
        let mut inner = self.lock();
        if !inner.routes.contains_key(&route.id) {
            return Ok(false);
        }
        if inner.routes.values().any(|r| r.name == route.name && r.id != route.id) {
            return Err(RepoError::DuplicateKey("routes.name".to_string()));
        }
        inner.routes.insert(route.id, route.clone());
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.lock().routes.remove(&id).is_some())
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn create(&self, vehicle: &Vehicle) -> RepoResult<()> {
        let mut inner = self.lock();
        if inner.vehicles.values().any(|v| v.plate_number == vehicle.plate_number) {
            return Err(RepoError::DuplicateKey("vehicles.plate_number".to_string()));
        }
        inner.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Vehicle>> {
        Ok(self.lock().vehicles.get(&id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<Vehicle>> {
        let mut vehicles: Vec<Vehicle> = self.lock().vehicles.values().cloned().collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(vehicles, offset, limit))
    }

    async fn update(&self, vehicle: &Vehicle) -> RepoResult<bool> {
        let mut inner = self.lock();
        if !inner.vehicles.contains_key(&vehicle.id) {
            return Ok(false);
        }
        if inner
            .vehicles
            .values()
            .any(|v| v.plate_number == vehicle.plate_number && v.id != vehicle.id)
        {
            return Err(RepoError::DuplicateKey("vehicles.plate_number".to_string()));
        }
        inner.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.lock().vehicles.remove(&id).is_some())
    }
}

#[async_trait]
impl DriverRepository for InMemoryStore {
    async fn create(&self, driver: &Driver) -> RepoResult<()> {
        let mut inner = self.lock();
        if inner
            .drivers
            .values()
            .any(|d| d.phone_number == driver.phone_number || d.license_number == driver.license_number)
        {
            return Err(RepoError::DuplicateKey("drivers.phone_number".to_string()));
        }
        inner.drivers.insert(driver.id, driver.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Driver>> {
        Ok(self.lock().drivers.get(&id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<Driver>> {
        let mut drivers: Vec<Driver> = self.lock().drivers.values().cloned().collect();
        drivers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(drivers, offset, limit))
    }

    async fn update(&self, driver: &Driver) -> RepoResult<bool> {
        let mut inner = self.lock();
        if !inner.drivers.contains_key(&driver.id) {
            return Ok(false);
        }
        if inner.drivers.values().any(|d| {
            d.id != driver.id
                && (d.phone_number == driver.phone_number
                    || d.license_number == driver.license_number)
        }) {
            return Err(RepoError::DuplicateKey("drivers.phone_number".to_string()));
        }
        inner.drivers.insert(driver.id, driver.clone());
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.lock().drivers.remove(&id).is_some())
    }
}

#[async_trait]
impl AddOnRepository for InMemoryStore {
    async fn create(&self, add_on: &AddOn) -> RepoResult<()> {
        self.lock().add_ons.insert(add_on.id, add_on.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<AddOn>> {
        Ok(self.lock().add_ons.get(&id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<AddOn>> {
        let mut add_ons: Vec<AddOn> = self.lock().add_ons.values().cloned().collect();
        add_ons.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(add_ons, offset, limit))
    }

    async fn find_active(&self, ids: &[Uuid]) -> RepoResult<Vec<AddOn>> {
        let inner = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| inner.add_ons.get(id))
            .filter(|a| a.is_active)
            .cloned()
            .collect())
    }

    async fn update(&self, add_on: &AddOn) -> RepoResult<bool> {
        let mut inner = self.lock();
        if !inner.add_ons.contains_key(&add_on.id) {
            return Ok(false);
        }
        inner.add_ons.insert(add_on.id, add_on.clone());
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.lock().add_ons.remove(&id).is_some())
    }
}

#[async_trait]
impl TripRepository for InMemoryStore {
    async fn create(&self, trip: &Trip) -> RepoResult<()> {
        self.lock().trips.insert(trip.id, trip.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Trip>> {
        Ok(self.lock().trips.get(&id).cloned())
    }

    async fn get_detailed(&self, id: Uuid) -> RepoResult<Option<TripDetail>> {
        let inner = self.lock();
        Ok(inner.trips.get(&id).and_then(|t| Self::detail(&inner, t)))
    }

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<TripDetail>> {
        let inner = self.lock();
        let mut trips: Vec<&Trip> = inner.trips.values().collect();
        trips.sort_by(|a, b| b.departure_time.cmp(&a.departure_time));
        let details: Vec<TripDetail> =
            trips.into_iter().filter_map(|t| Self::detail(&inner, t)).collect();
        Ok(paginate(details, offset, limit))
    }

    async fn list_bookable(&self, now: DateTime<Utc>) -> RepoResult<Vec<TripDetail>> {
        let inner = self.lock();
        Ok(inner
            .trips
            .values()
            .filter(|t| t.status == TripStatus::Scheduled && t.departure_time > now)
            .filter_map(|t| Self::detail(&inner, t))
            .collect())
    }

    async fn update(&self, trip: &Trip) -> RepoResult<bool> {
        let mut inner = self.lock();
        if !inner.trips.contains_key(&trip.id) {
            return Ok(false);
        }
        inner.trips.insert(trip.id, trip.clone());
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.lock().trips.remove(&id).is_some())
    }

    async fn append_seat_if_absent(&self, trip_id: Uuid, seat: &str) -> RepoResult<bool> {
        let mut inner = self.lock();
        match inner.trips.get_mut(&trip_id) {
            Some(trip) if !trip.booked_seats.iter().any(|s| s == seat) => {
                trip.booked_seats.push(seat.to_string());
                trip.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn route_has_booked_trips(&self, route_id: Uuid) -> RepoResult<bool> {
        Ok(self
            .lock()
            .trips
            .values()
            .any(|t| t.route_id == route_id && !t.booked_seats.is_empty()))
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn create(&self, booking: &Booking) -> RepoResult<()> {
        let mut inner = self.lock();
        if inner.bookings.values().any(|b| b.reference == booking.reference) {
            return Err(RepoError::DuplicateKey("bookings.reference".to_string()));
        }
        inner.bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Booking>> {
        Ok(self.lock().bookings.get(&id).cloned())
    }

    async fn find_by_reference(&self, reference: &str) -> RepoResult<Option<Booking>> {
        Ok(self.lock().bookings.values().find(|b| b.reference == reference).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<Booking>> {
        let mut bookings: Vec<Booking> = self.lock().bookings.values().cloned().collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(bookings, offset, limit))
    }

    async fn search_paid(&self, identifier: &str, limit: i64) -> RepoResult<Vec<Booking>> {
        let mut matches: Vec<Booking> = self
            .lock()
            .bookings
            .values()
            .filter(|b| b.payment_status == PaymentStatus::Paid)
            .filter(|b| {
                b.reference == identifier
                    || b.passengers
                        .iter()
                        .any(|p| p.email == identifier || p.phone_number == identifier)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches.truncate(limit.max(0) as usize);
        Ok(matches)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.lock().bookings.remove(&id).is_some())
    }

    async fn mark_paid_if_pending(&self, reference: &str, payment_ref: &str) -> RepoResult<bool> {
        let mut inner = self.lock();
        match inner
            .bookings
            .values_mut()
            .find(|b| b.reference == reference && b.payment_status == PaymentStatus::Pending)
        {
            Some(booking) => {
                booking.payment_status = PaymentStatus::Paid;
                booking.payment_ref = Some(payment_ref.to_string());
                booking.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_failed_if_pending(&self, reference: &str) -> RepoResult<bool> {
        let mut inner = self.lock();
        match inner
            .bookings
            .values_mut()
            .find(|b| b.reference == reference && b.payment_status == PaymentStatus::Pending)
        {
            Some(booking) => {
                booking.payment_status = PaymentStatus::Failed;
                booking.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_paid_manual(&self, id: Uuid, admin_id: Uuid) -> RepoResult<bool> {
        let mut inner = self.lock();
        match inner.bookings.get_mut(&id) {
            Some(booking) if booking.payment_status == PaymentStatus::Pending => {
                booking.payment_status = PaymentStatus::Paid;
                booking.payment_method = PaymentMethod::Manual;
                booking.marked_as_paid_by = Some(admin_id);
                booking.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn cancel(&self, id: Uuid) -> RepoResult<bool> {
        let mut inner = self.lock();
        match inner.bookings.get_mut(&id) {
            Some(booking) if booking.payment_status != PaymentStatus::Cancelled => {
                booking.payment_status = PaymentStatus::Cancelled;
                booking.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
