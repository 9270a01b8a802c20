//! Fixtures shared by the intake and reconciliation test suites.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use meridian_domain::{
    AddOn, BookedSegment, Driver, Passenger, PricingType, Route, Segment, TransportMode, Trip,
    TripStatus, Vehicle,
};
use uuid::Uuid;

use crate::gateway::{ChargeVerification, CheckoutSession, GatewayError, PaymentGateway};
use crate::intake::IntakeRequest;
use crate::memory::InMemoryStore;
use crate::notify::{NotifyError, TicketNotifier};
use crate::repository::{DriverRepository, RouteRepository, TripRepository, VehicleRepository};

pub struct Seeded {
    pub store: Arc<InMemoryStore>,
    pub trip_id: Uuid,
}

/// One scheduled Lagos→Ibadan→Abuja trip departing tomorrow, on a
/// ten-seater. Full-range fare is 10000 per passenger.
pub async fn seeded_store() -> Seeded {
    let store = Arc::new(InMemoryStore::new());
    let now = Utc::now();

    let route = Route {
        id: Uuid::new_v4(),
        name: "Lagos-Abuja".to_string(),
        segments: vec![
            Segment {
                origin: "Lagos".to_string(),
                destination: "Ibadan".to_string(),
                cost: 3000.0,
                mode: TransportMode::Road,
                duration_estimate: Some("2h".to_string()),
            },
            Segment {
                origin: "Ibadan".to_string(),
                destination: "Abuja".to_string(),
                cost: 7000.0,
                mode: TransportMode::Road,
                duration_estimate: Some("7h".to_string()),
            },
        ],
        is_featured: true,
        image_url: "https://img.example/lagos-abuja.jpg".to_string(),
        created_at: now,
        updated_at: now,
    };
    let vehicle = Vehicle {
        id: Uuid::new_v4(),
        name: "Executive Sprinter".to_string(),
        plate_number: "LAG-483-XA".to_string(),
        capacity: 10,
        car_type: "Sprinter".to_string(),
        amenities: vec!["WiFi".to_string(), "AC".to_string()],
        created_at: now,
        updated_at: now,
    };
    let driver = Driver {
        id: Uuid::new_v4(),
        first_name: "Emeka".to_string(),
        last_name: "Obi".to_string(),
        phone_number: "+2348030000001".to_string(),
        license_number: "DL-10293".to_string(),
        created_at: now,
        updated_at: now,
    };
    let trip = Trip {
        id: Uuid::new_v4(),
        route_id: route.id,
        vehicle_id: vehicle.id,
        driver_id: driver.id,
        departure_time: now + Duration::days(1),
        booked_seats: Vec::new(),
        status: TripStatus::Scheduled,
        created_at: now,
        updated_at: now,
    };

    RouteRepository::create(store.as_ref(), &route).await.unwrap();
    VehicleRepository::create(store.as_ref(), &vehicle).await.unwrap();
    DriverRepository::create(store.as_ref(), &driver).await.unwrap();
    TripRepository::create(store.as_ref(), &trip).await.unwrap();

    Seeded { store, trip_id: trip.id }
}

pub fn passenger(email: &str) -> Passenger {
    Passenger {
        title: Some("Mr".to_string()),
        first_name: "Ade".to_string(),
        last_name: "Balogun".to_string(),
        nationality: None,
        gender: None,
        date_of_birth: None,
        document_type: None,
        id_number: None,
        phone_number: "+2348020000002".to_string(),
        email: email.to_string(),
    }
}

pub fn add_on(name: &str, price: f64, pricing_type: PricingType, is_active: bool) -> AddOn {
    AddOn {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: format!("{name} add-on"),
        price,
        icon: None,
        pricing_type,
        is_active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Full-range request for the seeded trip: `pax` passengers, the given
/// explicit seats, and whatever total the caller claims.
pub fn intake_request(trip_id: Uuid, pax: usize, seats: &[&str], client_total: f64) -> IntakeRequest {
    IntakeRequest {
        trip_id,
        passengers: (0..pax).map(|i| passenger(&format!("pax{i}@example.com"))).collect(),
        booked_segments: vec![
            BookedSegment { origin: "Lagos".to_string(), destination: "Ibadan".to_string() },
            BookedSegment { origin: "Ibadan".to_string(), destination: "Abuja".to_string() },
        ],
        seat_numbers: seats.iter().map(|s| s.to_string()).collect(),
        add_on_ids: Vec::new(),
        client_total,
    }
}

pub fn pending_booking(trip_id: Uuid, reference: &str, seats: &[&str], total: f64) -> meridian_domain::Booking {
    use meridian_domain::{Booking, PaymentMethod, PaymentStatus};
    let now = Utc::now();
    Booking {
        id: Uuid::new_v4(),
        trip_id,
        reference: reference.to_string(),
        booked_segments: vec![
            BookedSegment { origin: "Lagos".to_string(), destination: "Ibadan".to_string() },
            BookedSegment { origin: "Ibadan".to_string(), destination: "Abuja".to_string() },
        ],
        passengers: vec![passenger("lead@example.com")],
        seat_numbers: seats.iter().map(|s| s.to_string()).collect(),
        booked_add_ons: Vec::new(),
        total_cost: total,
        payment_status: PaymentStatus::Pending,
        payment_ref: None,
        payment_method: PaymentMethod::Paystack,
        marked_as_paid_by: None,
        created_at: now,
        updated_at: now,
    }
}

pub struct MockGateway {
    fail_initialize: bool,
    initialize_calls: AtomicUsize,
    last_amount_minor: Mutex<Option<i64>>,
}

impl MockGateway {
    pub fn succeeding() -> Self {
        Self {
            fail_initialize: false,
            initialize_calls: AtomicUsize::new(0),
            last_amount_minor: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self { fail_initialize: true, ..Self::succeeding() }
    }

    pub fn initialize_calls(&self) -> usize {
        self.initialize_calls.load(Ordering::SeqCst)
    }

    pub fn last_amount_minor(&self) -> Option<i64> {
        *self.last_amount_minor.lock().unwrap()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn initialize(
        &self,
        amount_minor: i64,
        _reference: &str,
        _email: &str,
        _metadata: serde_json::Value,
    ) -> Result<CheckoutSession, GatewayError> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_amount_minor.lock().unwrap() = Some(amount_minor);
        if self.fail_initialize {
            return Err(GatewayError::Rejected("no checkout url returned".to_string()));
        }
        Ok(CheckoutSession { checkout_url: "https://checkout.example/session".to_string() })
    }

    async fn verify(&self, _reference: &str) -> Result<ChargeVerification, GatewayError> {
        Err(GatewayError::Unavailable("verify not stubbed".to_string()))
    }
}

#[derive(Default)]
pub struct MockNotifier {
    sends: AtomicUsize,
    fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { sends: AtomicUsize::new(0), fail: true }
    }

    pub fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TicketNotifier for MockNotifier {
    async fn send_ticket(&self, _reference: &str) -> Result<(), NotifyError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NotifyError("smtp unreachable".to_string()));
        }
        Ok(())
    }
}
