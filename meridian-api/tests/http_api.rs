use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use meridian_api::auth::AdminClaims;
use meridian_api::state::{AppState, AuthConfig};
use meridian_core::gateway::{ChargeVerification, CheckoutSession, GatewayError, PaymentGateway};
use meridian_core::intake::BookingIntake;
use meridian_core::memory::InMemoryStore;
use meridian_core::notify::{NotifyError, TicketNotifier};
use meridian_core::reconcile::PaymentReconciler;
use meridian_core::repository::{
    BookingRepository, DriverRepository, RouteRepository, TripRepository, VehicleRepository,
};
use meridian_domain::{
    BookedSegment, Booking, Driver, Passenger, PaymentMethod, PaymentStatus, Route, Segment,
    TransportMode, Trip, TripStatus, Vehicle,
};
use serde_json::{json, Value};
use sha2::Sha512;
use tower::ServiceExt;
use uuid::Uuid;

const WEBHOOK_SECRET: &str = "sk_test_webhook_secret";
const JWT_SECRET: &str = "test-jwt-secret";

// ============================================================================
// Test Doubles
// ============================================================================

struct TestGateway {
    verify_success: bool,
    verify_amount_minor: i64,
}

#[async_trait]
impl PaymentGateway for TestGateway {
    async fn initialize(
        &self,
        _amount_minor: i64,
        reference: &str,
        _email: &str,
        _metadata: Value,
    ) -> Result<CheckoutSession, GatewayError> {
        Ok(CheckoutSession {
            checkout_url: format!("https://checkout.example/{reference}"),
        })
    }

    async fn verify(&self, _reference: &str) -> Result<ChargeVerification, GatewayError> {
        Ok(ChargeVerification {
            success: self.verify_success,
            amount_minor: self.verify_amount_minor,
            customer_email: Some("lead@example.com".to_string()),
            gateway_message: if self.verify_success {
                None
            } else {
                Some("Declined".to_string())
            },
        })
    }
}

#[derive(Default)]
struct TestNotifier {
    sends: AtomicUsize,
}

#[async_trait]
impl TicketNotifier for TestNotifier {
    async fn send_ticket(&self, _reference: &str) -> Result<(), NotifyError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

struct TestApp {
    app: axum::Router,
    store: Arc<InMemoryStore>,
    notifier: Arc<TestNotifier>,
    trip_id: Uuid,
    route_id: Uuid,
}

async fn spawn_app(gateway: TestGateway) -> TestApp {
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
                duration_estimate: None,
            },
            Segment {
                origin: "Ibadan".to_string(),
                destination: "Abuja".to_string(),
                cost: 7000.0,
                mode: TransportMode::Road,
                duration_estimate: None,
            },
        ],
        is_featured: true,
        image_url: "https://img.example/route.jpg".to_string(),
        created_at: now,
        updated_at: now,
    };
    let vehicle = Vehicle {
        id: Uuid::new_v4(),
        name: "Executive Sprinter".to_string(),
        plate_number: "LAG-483-XA".to_string(),
        capacity: 10,
        car_type: "Sprinter".to_string(),
        amenities: vec!["WiFi".to_string()],
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

    let gateway: Arc<dyn PaymentGateway> = Arc::new(gateway);
    let notifier = Arc::new(TestNotifier::default());

    let intake = Arc::new(BookingIntake::new(
        store.clone() as Arc<dyn TripRepository>,
        store.clone() as Arc<dyn BookingRepository>,
        store.clone() as Arc<dyn meridian_core::AddOnRepository>,
        gateway.clone(),
    ));
    let reconciler = Arc::new(PaymentReconciler::new(
        store.clone() as Arc<dyn BookingRepository>,
        store.clone() as Arc<dyn TripRepository>,
        notifier.clone() as Arc<dyn TicketNotifier>,
    ));

    let state = AppState {
        routes: store.clone(),
        vehicles: store.clone(),
        drivers: store.clone(),
        trips: store.clone(),
        add_ons: store.clone(),
        bookings: store.clone(),
        gateway,
        notifier: notifier.clone(),
        intake,
        reconciler,
        auth: AuthConfig { secret: JWT_SECRET.to_string() },
        webhook_secret: WEBHOOK_SECRET.to_string(),
    };

    TestApp { app: meridian_api::app(state), store, notifier, trip_id: trip.id, route_id: route.id }
}

fn sign_body(body: &str) -> String {
    let mut mac = Hmac::<Sha512>::new_from_slice(WEBHOOK_SECRET.as_bytes()).unwrap();
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn admin_token() -> String {
    let claims = AdminClaims {
        sub: Uuid::new_v4().to_string(),
        email: Some("ops@meridian.example".to_string()),
        role: "admin".to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(JWT_SECRET.as_bytes())).unwrap()
}

fn pending_booking(trip_id: Uuid, reference: &str, seats: &[&str], total: f64) -> Booking {
    let now = Utc::now();
    Booking {
        id: Uuid::new_v4(),
        trip_id,
        reference: reference.to_string(),
        booked_segments: vec![
            BookedSegment { origin: "Lagos".to_string(), destination: "Ibadan".to_string() },
            BookedSegment { origin: "Ibadan".to_string(), destination: "Abuja".to_string() },
        ],
        passengers: vec![Passenger {
            title: None,
            first_name: "Ade".to_string(),
            last_name: "Balogun".to_string(),
            nationality: None,
            gender: None,
            date_of_birth: None,
            document_type: None,
            id_number: None,
            phone_number: "+2348020000002".to_string(),
            email: "lead@example.com".to_string(),
        }],
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

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn webhook_request(body: &str, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/v1/webhooks/paystack")
        .header("content-type", "application/json");
    if let Some(sig) = signature {
        builder = builder.header("x-paystack-signature", sig);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

// ============================================================================
// Webhook
// ============================================================================

#[tokio::test]
async fn webhook_without_signature_is_unauthorized() {
    let harness = spawn_app(TestGateway { verify_success: true, verify_amount_minor: 0 }).await;
    let body = json!({"event": "charge.success", "data": {"reference": "MRD-AAAAAA", "amount": 1}})
        .to_string();

    let response = harness.app.oneshot(webhook_request(&body, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn webhook_with_invalid_signature_changes_nothing() {
    let harness = spawn_app(TestGateway { verify_success: true, verify_amount_minor: 0 }).await;
    let booking = pending_booking(harness.trip_id, "MRD-SIG001", &["3A"], 20000.0);
    BookingRepository::create(harness.store.as_ref(), &booking).await.unwrap();

    let body = json!({
        "event": "charge.success",
        "data": {"reference": "MRD-SIG001", "amount": 2_000_000}
    })
    .to_string();

    let response =
        harness.app.oneshot(webhook_request(&body, Some("deadbeef"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let stored =
        harness.store.find_by_reference("MRD-SIG001").await.unwrap().unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn signed_charge_success_confirms_booking_and_commits_seats() {
    let harness = spawn_app(TestGateway { verify_success: true, verify_amount_minor: 0 }).await;
    let booking = pending_booking(harness.trip_id, "MRD-OK0001", &["3A", "3B"], 20000.0);
    BookingRepository::create(harness.store.as_ref(), &booking).await.unwrap();

    let body = json!({
        "event": "charge.success",
        "data": {"reference": "MRD-OK0001", "amount": 2_000_000}
    })
    .to_string();
    let signature = sign_body(&body);

    let response =
        harness.app.clone().oneshot(webhook_request(&body, Some(&signature))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = harness.store.find_by_reference("MRD-OK0001").await.unwrap().unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Paid);

    let trip =
        TripRepository::get(harness.store.as_ref(), harness.trip_id).await.unwrap().unwrap();
    assert_eq!(trip.booked_seats, vec!["3A".to_string(), "3B".to_string()]);
    assert_eq!(harness.notifier.sends.load(Ordering::SeqCst), 1);

    // Redelivery is acknowledged but appends nothing and emails no one.
    let response =
        harness.app.oneshot(webhook_request(&body, Some(&signature))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let trip =
        TripRepository::get(harness.store.as_ref(), harness.trip_id).await.unwrap().unwrap();
    assert_eq!(trip.booked_seats.len(), 2);
    assert_eq!(harness.notifier.sends.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn webhook_amount_mismatch_is_rejected() {
    let harness = spawn_app(TestGateway { verify_success: true, verify_amount_minor: 0 }).await;
    let booking = pending_booking(harness.trip_id, "MRD-AMT001", &["3A"], 20000.0);
    BookingRepository::create(harness.store.as_ref(), &booking).await.unwrap();

    let body = json!({
        "event": "charge.success",
        "data": {"reference": "MRD-AMT001", "amount": 50}
    })
    .to_string();
    let signature = sign_body(&body);

    let response =
        harness.app.oneshot(webhook_request(&body, Some(&signature))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let stored = harness.store.find_by_reference("MRD-AMT001").await.unwrap().unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn webhook_for_unknown_reference_is_not_found() {
    let harness = spawn_app(TestGateway { verify_success: true, verify_amount_minor: 0 }).await;

    let body = json!({
        "event": "charge.success",
        "data": {"reference": "MRD-GHOST1", "amount": 100}
    })
    .to_string();
    let signature = sign_body(&body);

    let response =
        harness.app.oneshot(webhook_request(&body, Some(&signature))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn charge_failed_webhook_parks_the_booking() {
    let harness = spawn_app(TestGateway { verify_success: true, verify_amount_minor: 0 }).await;
    let booking = pending_booking(harness.trip_id, "MRD-FAIL01", &["3A"], 20000.0);
    BookingRepository::create(harness.store.as_ref(), &booking).await.unwrap();

    let body = json!({
        "event": "charge.failed",
        "data": {"reference": "MRD-FAIL01", "amount": 2_000_000}
    })
    .to_string();
    let signature = sign_body(&body);

    let response =
        harness.app.oneshot(webhook_request(&body, Some(&signature))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = harness.store.find_by_reference("MRD-FAIL01").await.unwrap().unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Failed);
}

// ============================================================================
// Redirect-time verify
// ============================================================================

#[tokio::test]
async fn verify_reports_failure_without_touching_the_booking() {
    let harness = spawn_app(TestGateway { verify_success: false, verify_amount_minor: 0 }).await;
    let booking = pending_booking(harness.trip_id, "MRD-VRF001", &["3A"], 20000.0);
    BookingRepository::create(harness.store.as_ref(), &booking).await.unwrap();

    let response = harness
        .app
        .oneshot(
            Request::builder()
                .uri("/v1/payments/verify?reference=MRD-VRF001")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "failed");
    assert_eq!(body["message"], "Declined");

    let stored = harness.store.find_by_reference("MRD-VRF001").await.unwrap().unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn verify_confirms_when_the_webhook_has_not_landed() {
    let harness =
        spawn_app(TestGateway { verify_success: true, verify_amount_minor: 2_000_000 }).await;
    let booking = pending_booking(harness.trip_id, "MRD-VRF002", &["4D"], 20000.0);
    BookingRepository::create(harness.store.as_ref(), &booking).await.unwrap();

    let response = harness
        .app
        .oneshot(
            Request::builder()
                .uri("/v1/payments/verify?reference=MRD-VRF002")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["reference"], "MRD-VRF002");
    assert_eq!(body["amount"], 20000.0);

    let stored = harness.store.find_by_reference("MRD-VRF002").await.unwrap().unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Paid);
    let trip =
        TripRepository::get(harness.store.as_ref(), harness.trip_id).await.unwrap().unwrap();
    assert_eq!(trip.booked_seats, vec!["4D".to_string()]);
}

#[tokio::test]
async fn verify_without_reference_is_a_bad_request() {
    let harness = spawn_app(TestGateway { verify_success: true, verify_amount_minor: 0 }).await;
    let response = harness
        .app
        .oneshot(Request::builder().uri("/v1/payments/verify").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Booking intake
// ============================================================================

#[tokio::test]
async fn booking_intake_returns_checkout_url() {
    let harness = spawn_app(TestGateway { verify_success: true, verify_amount_minor: 0 }).await;

    let payload = json!({
        "trip_id": harness.trip_id,
        "passengers": [{
            "first_name": "Ade",
            "last_name": "Balogun",
            "phone_number": "+2348020000002",
            "email": "lead@example.com"
        }],
        "booked_segments": [
            {"origin": "Lagos", "destination": "Ibadan"},
            {"origin": "Ibadan", "destination": "Abuja"}
        ],
        "seat_numbers": ["3A"],
        "total_cost": 10000.0
    });

    let response = harness
        .app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/bookings")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    let reference = body["reference"].as_str().unwrap();
    assert!(reference.starts_with("MRD-"));
    assert_eq!(
        body["checkout_url"].as_str().unwrap(),
        format!("https://checkout.example/{reference}")
    );

    let stored = harness.store.find_by_reference(reference).await.unwrap().unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn booking_intake_rejects_price_mismatch_with_conflict() {
    let harness = spawn_app(TestGateway { verify_success: true, verify_amount_minor: 0 }).await;

    let payload = json!({
        "trip_id": harness.trip_id,
        "passengers": [{
            "first_name": "Ade",
            "last_name": "Balogun",
            "phone_number": "+2348020000002",
            "email": "lead@example.com"
        }],
        "booked_segments": [
            {"origin": "Lagos", "destination": "Ibadan"},
            {"origin": "Ibadan", "destination": "Abuja"}
        ],
        "total_cost": 9000.0
    });

    let response = harness
        .app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/bookings")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ============================================================================
// Search and public trip detail
// ============================================================================

#[tokio::test]
async fn trip_search_matches_sub_range_connections() {
    let harness = spawn_app(TestGateway { verify_success: true, verify_amount_minor: 0 }).await;

    let response = harness
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/trips/search?from=Ibadan&to=Abuja")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["route"]["name"], "Lagos-Abuja");

    // No route serves the reverse direction.
    let response = harness
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/trips/search?from=Abuja&to=Lagos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body.as_array().unwrap().is_empty());

    let response = harness
        .app
        .oneshot(Request::builder().uri("/v1/trips/search").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cancelled_trip_is_not_publicly_visible() {
    let harness = spawn_app(TestGateway { verify_success: true, verify_amount_minor: 0 }).await;
    {
        let mut trip =
            TripRepository::get(harness.store.as_ref(), harness.trip_id).await.unwrap().unwrap();
        trip.status = TripStatus::Cancelled;
        TripRepository::update(harness.store.as_ref(), &trip).await.unwrap();
    }

    let response = harness
        .app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/trips/{}", harness.trip_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Admin gate and manual override
// ============================================================================

#[tokio::test]
async fn admin_endpoints_require_a_valid_admin_token() {
    let harness = spawn_app(TestGateway { verify_success: true, verify_amount_minor: 0 }).await;

    let response = harness
        .app
        .clone()
        .oneshot(Request::builder().uri("/v1/admin/bookings").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = harness
        .app
        .oneshot(
            Request::builder()
                .uri("/v1/admin/bookings")
                .header("Authorization", format!("Bearer {}", admin_token()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn structural_edits_are_blocked_once_seats_are_sold() {
    let harness = spawn_app(TestGateway { verify_success: true, verify_amount_minor: 0 }).await;
    let trip = {
        let mut trip =
            TripRepository::get(harness.store.as_ref(), harness.trip_id).await.unwrap().unwrap();
        trip.booked_seats = vec!["3A".to_string()];
        TripRepository::update(harness.store.as_ref(), &trip).await.unwrap();
        trip
    };
    let token = admin_token();

    // Moving the departure time of a trip with sold seats is refused.
    let payload = json!({
        "route_id": trip.route_id,
        "vehicle_id": trip.vehicle_id,
        "driver_id": trip.driver_id,
        "departure_time": trip.departure_time + Duration::hours(2),
        "status": "scheduled"
    });
    let response = harness
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/v1/admin/trips/{}", trip.id))
                .header("Authorization", format!("Bearer {token}"))
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // So is deleting it.
    let response = harness
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/admin/trips/{}", trip.id))
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // And so is editing the route the sold inventory was priced against.
    let payload = json!({
        "name": "Lagos-Abuja",
        "segments": [{"origin": "Lagos", "destination": "Abuja", "cost": 12000.0, "mode": "road"}],
        "image_url": "https://img.example/route.jpg"
    });
    let response = harness
        .app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/v1/admin/routes/{}", harness.route_id))
                .header("Authorization", format!("Bearer {token}"))
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn admin_manual_confirmation_marks_paid_and_commits_seats() {
    let harness = spawn_app(TestGateway { verify_success: true, verify_amount_minor: 0 }).await;
    let booking = pending_booking(harness.trip_id, "MRD-MAN001", &["6F"], 20000.0);
    BookingRepository::create(harness.store.as_ref(), &booking).await.unwrap();

    let response = harness
        .app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/v1/admin/bookings/{}", booking.id))
                .header("Authorization", format!("Bearer {}", admin_token()))
                .header("content-type", "application/json")
                .body(Body::from(json!({"status": "paid"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["payment_status"], "paid");
    assert_eq!(body["payment_method"], "manual");
    assert!(body["marked_as_paid_by"].is_string());

    let trip =
        TripRepository::get(harness.store.as_ref(), harness.trip_id).await.unwrap().unwrap();
    assert_eq!(trip.booked_seats, vec!["6F".to_string()]);
}
