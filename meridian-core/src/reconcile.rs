use std::sync::Arc;

use meridian_domain::PaymentStatus;
use uuid::Uuid;

use crate::notify::TicketNotifier;
use crate::pricing;
use crate::repository::{BookingRepository, RepoError, TripRepository};

/// Which entry point observed the payment. Both converge on the same
/// transition logic; the webhook additionally carries the charged amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationSource {
    Webhook,
    RedirectVerify,
}

impl ConfirmationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationSource::Webhook => "webhook",
            ConfirmationSource::RedirectVerify => "redirect-verify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// This call won the `pending → paid` transition and committed seats.
    Confirmed,
    /// The booking was already paid; nothing was changed and no duplicate
    /// notification was sent.
    AlreadyPaid,
}

#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("no booking found for reference")]
    BookingNotFound,

    #[error("paid amount {observed} does not match expected {expected}")]
    AmountMismatch { expected: i64, observed: i64 },

    #[error("booking is {0:?} and cannot be confirmed")]
    TerminalState(PaymentStatus),

    #[error(transparent)]
    Store(#[from] RepoError),
}

/// The `pending → {paid, failed, cancelled}` state machine.
///
/// Webhook push and redirect-time verify both land here, so the idempotence
/// guard, the seat commit, and the notification exist exactly once. The
/// guard is an atomic conditional update (`paid` only where still
/// `pending`), which closes the concurrent double-write the two racing
/// entry points would otherwise allow.
pub struct PaymentReconciler {
    bookings: Arc<dyn BookingRepository>,
    trips: Arc<dyn TripRepository>,
    notifier: Arc<dyn TicketNotifier>,
}

impl PaymentReconciler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        trips: Arc<dyn TripRepository>,
        notifier: Arc<dyn TicketNotifier>,
    ) -> Self {
        Self { bookings, trips, notifier }
    }

    /// Drive a booking to `paid`. `observed_minor` is the amount the
    /// provider reports having charged (webhook path); when present it must
    /// equal the booking total in minor units before any state changes.
    /// The redirect-verify path passes `None`: the provider already
    /// confirmed the charge for this reference during the verify call.
    pub async fn confirm(
        &self,
        reference: &str,
        observed_minor: Option<i64>,
        source: ConfirmationSource,
    ) -> Result<Confirmation, ReconcileError> {
        let booking = self
            .bookings
            .find_by_reference(reference)
            .await?
            .ok_or(ReconcileError::BookingNotFound)?;

        if let Some(observed) = observed_minor {
            let expected = pricing::to_minor_units(booking.total_cost);
            if observed != expected {
                tracing::error!(
                    reference,
                    expected,
                    observed,
                    "webhook amount mismatch, refusing to confirm"
                );
                return Err(ReconcileError::AmountMismatch { expected, observed });
            }
        }

        if booking.payment_status == PaymentStatus::Paid {
            return Ok(Confirmation::AlreadyPaid);
        }

        // The read above is only advisory; this conditional write is the
        // real idempotence guard under concurrent delivery.
        let won = self.bookings.mark_paid_if_pending(reference, reference).await?;
        if !won {
            let current = self
                .bookings
                .find_by_reference(reference)
                .await?
                .ok_or(ReconcileError::BookingNotFound)?;
            return match current.payment_status {
                PaymentStatus::Paid => Ok(Confirmation::AlreadyPaid),
                status => Err(ReconcileError::TerminalState(status)),
            };
        }

        tracing::info!(reference, source = source.as_str(), "payment confirmed");
        self.commit_seats(booking.trip_id, reference, &booking.seat_numbers).await;
        self.notify(reference).await;

        Ok(Confirmation::Confirmed)
    }

    /// `charge.failed`: park a still-pending booking as failed. Unknown
    /// references are ignored; the provider's retry policy owns redelivery.
    pub async fn fail(&self, reference: &str) -> Result<(), ReconcileError> {
        if self.bookings.mark_failed_if_pending(reference).await? {
            tracing::info!(reference, "payment failed");
        }
        Ok(())
    }

    /// Admin override: confirm a pending booking without a provider charge.
    /// Seats are committed the same way the provider paths commit them, so
    /// manually confirmed passengers occupy inventory too.
    pub async fn mark_paid_manual(
        &self,
        booking_id: Uuid,
        admin_id: Uuid,
    ) -> Result<Confirmation, ReconcileError> {
        let booking =
            self.bookings.get(booking_id).await?.ok_or(ReconcileError::BookingNotFound)?;

        let won = self.bookings.mark_paid_manual(booking_id, admin_id).await?;
        if !won {
            let current =
                self.bookings.get(booking_id).await?.ok_or(ReconcileError::BookingNotFound)?;
            return match current.payment_status {
                PaymentStatus::Paid => Ok(Confirmation::AlreadyPaid),
                status => Err(ReconcileError::TerminalState(status)),
            };
        }

        tracing::info!(reference = %booking.reference, admin = %admin_id, "booking marked paid manually");
        self.commit_seats(booking.trip_id, &booking.reference, &booking.seat_numbers).await;

        Ok(Confirmation::Confirmed)
    }

    /// Admin override: cancel from any non-cancelled state. Returns whether
    /// anything changed.
    pub async fn cancel(&self, booking_id: Uuid) -> Result<bool, ReconcileError> {
        if self.bookings.get(booking_id).await?.is_none() {
            return Err(ReconcileError::BookingNotFound);
        }
        Ok(self.bookings.cancel(booking_id).await?)
    }

    /// Append each booked seat that is not already on the trip. Runs only on
    /// the winning transition; capacity is deliberately not re-validated
    /// here (intake checked it against the last known snapshot). A storage
    /// failure on one seat is logged and the rest still committed — the
    /// payment itself is already recorded and must not be rolled back.
    async fn commit_seats(&self, trip_id: Uuid, reference: &str, seats: &[String]) {
        for seat in seats {
            match self.trips.append_seat_if_absent(trip_id, seat).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!(reference, %trip_id, seat = %seat, "seat already committed, skipping");
                }
                Err(err) => {
                    tracing::error!(reference, %trip_id, seat = %seat, error = %err, "failed to commit seat");
                }
            }
        }
    }

    async fn notify(&self, reference: &str) {
        if let Err(err) = self.notifier.send_ticket(reference).await {
            tracing::warn!(reference, error = %err, "ticket notification failed");
        }
    }
}
