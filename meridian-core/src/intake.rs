use std::sync::Arc;

use chrono::Utc;
use meridian_domain::{
    BookedAddOn, BookedSegment, Booking, Passenger, PaymentMethod, PaymentStatus,
};
use uuid::Uuid;

use crate::gateway::{GatewayError, PaymentGateway};
use crate::pricing;
use crate::reference;
use crate::repository::{AddOnRepository, BookingRepository, RepoError, TripRepository};

#[derive(Debug, Clone)]
pub struct IntakeRequest {
    pub trip_id: Uuid,
    pub passengers: Vec<Passenger>,
    pub booked_segments: Vec<BookedSegment>,
    pub seat_numbers: Vec<String>,
    pub add_on_ids: Vec<Uuid>,
    /// The total the client displayed; verified against the recomputed
    /// server total, never trusted.
    pub client_total: f64,
}

#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    pub reference: String,
    pub checkout_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("missing required booking fields: {0}")]
    Invalid(&'static str),

    #[error("trip not found")]
    TripNotFound,

    #[error("this trip is no longer available")]
    TripGone,

    #[error("requested segments do not match the trip's route")]
    InvalidSegments,

    #[error("price mismatch: client sent {client}, server computed {server}")]
    PriceMismatch { client: f64, server: f64 },

    #[error("total cost cannot be zero or negative")]
    NonPositiveTotal,

    #[error("not enough seats available, only {available} left")]
    InsufficientCapacity { available: i32 },

    #[error("one or more selected seats are no longer available")]
    SeatTaken,

    #[error("could not allocate a unique booking reference")]
    ReferenceExhausted,

    #[error("payment provider failed to initialize: {0}")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Store(#[from] RepoError),
}

/// Validates a booking request against current trip inventory and persists a
/// pending booking with a provider checkout session.
///
/// Inventory is validated here but not reserved; seats are committed to the
/// trip only when the payment is confirmed. Two concurrent intakes for the
/// last seat can therefore both pass — the seat-collision guard at
/// confirmation time is the final arbiter for explicit seat numbers.
pub struct BookingIntake {
    trips: Arc<dyn TripRepository>,
    bookings: Arc<dyn BookingRepository>,
    add_ons: Arc<dyn AddOnRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl BookingIntake {
    pub fn new(
        trips: Arc<dyn TripRepository>,
        bookings: Arc<dyn BookingRepository>,
        add_ons: Arc<dyn AddOnRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self { trips, bookings, add_ons, gateway }
    }

    pub async fn submit(&self, req: IntakeRequest) -> Result<IntakeOutcome, IntakeError> {
        let lead = req.passengers.first().ok_or(IntakeError::Invalid("passengers"))?.clone();
        if req.booked_segments.is_empty() {
            return Err(IntakeError::Invalid("booked_segments"));
        }
        let passenger_count = req.passengers.len() as u32;

        let detail =
            self.trips.get_detailed(req.trip_id).await?.ok_or(IntakeError::TripNotFound)?;
        if !detail.trip.is_bookable(Utc::now()) {
            return Err(IntakeError::TripGone);
        }

        // Inactive or deleted add-ons are treated as no longer offered and
        // silently dropped, not errored.
        let add_ons = self.add_ons.find_active(&req.add_on_ids).await?;

        let from = &req.booked_segments[0].origin;
        let to = &req.booked_segments[req.booked_segments.len() - 1].destination;
        let base = pricing::price_segment_range(&detail.route.segments, from, to)
            .ok_or(IntakeError::InvalidSegments)?;
        let server_total = pricing::total_price(base, passenger_count, &add_ons);

        if !pricing::amounts_match(server_total, req.client_total) {
            tracing::warn!(
                client = req.client_total,
                server = server_total,
                trip_id = %req.trip_id,
                "rejecting booking with mismatched total"
            );
            return Err(IntakeError::PriceMismatch {
                client: req.client_total,
                server: server_total,
            });
        }
        if server_total <= 0.0 {
            return Err(IntakeError::NonPositiveTotal);
        }

        let available = detail.trip.available_capacity(detail.vehicle.capacity);
        if passenger_count as i32 > available {
            return Err(IntakeError::InsufficientCapacity { available });
        }
        if req.seat_numbers.iter().any(|seat| detail.trip.has_seat(seat)) {
            return Err(IntakeError::SeatTaken);
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            trip_id: detail.trip.id,
            reference: reference::new_reference(),
            booked_segments: req.booked_segments,
            passengers: req.passengers,
            seat_numbers: req.seat_numbers,
            booked_add_ons: add_ons
                .iter()
                .map(|a| BookedAddOn { name: a.name.clone(), price: a.price })
                .collect(),
            total_cost: server_total,
            payment_status: PaymentStatus::Pending,
            payment_ref: None,
            payment_method: PaymentMethod::Paystack,
            marked_as_paid_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let booking = self.persist_with_fresh_reference(booking).await?;

        let metadata = serde_json::json!({
            "booking_id": booking.id,
            "reference": booking.reference,
            "trip_name": detail.route.name,
        });
        let session = match self
            .gateway
            .initialize(
                pricing::to_minor_units(server_total),
                &booking.reference,
                &lead.email,
                metadata,
            )
            .await
        {
            Ok(session) => session,
            Err(err) => {
                // Compensation: never leave a pending booking behind with no
                // corresponding payment attempt.
                if let Err(delete_err) = self.bookings.delete(booking.id).await {
                    tracing::error!(
                        reference = %booking.reference,
                        error = %delete_err,
                        "failed to delete orphaned pending booking"
                    );
                }
                return Err(IntakeError::Gateway(err));
            }
        };

        tracing::info!(
            reference = %booking.reference,
            trip_id = %booking.trip_id,
            total = server_total,
            "booking created, awaiting payment"
        );

        Ok(IntakeOutcome { reference: booking.reference, checkout_url: session.checkout_url })
    }

    /// A reference collision on the unique index is retried once with a
    /// fresh reference, then given up on.
    async fn persist_with_fresh_reference(
        &self,
        mut booking: Booking,
    ) -> Result<Booking, IntakeError> {
        match self.bookings.create(&booking).await {
            Ok(()) => Ok(booking),
            Err(RepoError::DuplicateKey(_)) => {
                booking.reference = reference::new_reference();
                match self.bookings.create(&booking).await {
                    Ok(()) => Ok(booking),
                    Err(RepoError::DuplicateKey(_)) => Err(IntakeError::ReferenceExhausted),
                    Err(err) => Err(err.into()),
                }
            }
            Err(err) => Err(err.into()),
        }
    }
}
