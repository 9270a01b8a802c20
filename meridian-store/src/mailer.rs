use std::sync::Arc;

use async_trait::async_trait;
use meridian_core::notify::{NotifyError, TicketNotifier};
use meridian_core::repository::{BookingRepository, TripRepository};
use meridian_domain::{Booking, PaymentStatus};
use serde::Serialize;

use crate::app_config::MailConfig;

/// Ticket delivery via the Resend email API. Looks the booking up on its
/// own so both reconciliation paths (and the resend endpoint) can hand it
/// nothing but the reference.
pub struct ResendTicketMailer {
    http: reqwest::Client,
    config: MailConfig,
    bookings: Arc<dyn BookingRepository>,
    trips: Arc<dyn TripRepository>,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<String>,
}

impl ResendTicketMailer {
    pub fn new(
        config: MailConfig,
        bookings: Arc<dyn BookingRepository>,
        trips: Arc<dyn TripRepository>,
    ) -> Self {
        Self { http: reqwest::Client::new(), config, bookings, trips }
    }

    fn render_ticket(&self, booking: &Booking, route_name: &str, vehicle_name: &str) -> String {
        let passengers = booking
            .passengers
            .iter()
            .map(|p| format!("<li>{} {}</li>", p.first_name, p.last_name))
            .collect::<String>();
        let seats = if booking.seat_numbers.is_empty() {
            "Assigned at boarding".to_string()
        } else {
            booking.seat_numbers.join(", ")
        };
        let add_ons = if booking.booked_add_ons.is_empty() {
            String::new()
        } else {
            let items = booking
                .booked_add_ons
                .iter()
                .map(|a| format!("<li>{} — {:.2}</li>", a.name, a.price))
                .collect::<String>();
            format!("<h3>Add-ons</h3><ul>{items}</ul>")
        };
        let journey = booking
            .booked_segments
            .first()
            .zip(booking.booked_segments.last())
            .map(|(first, last)| format!("{} → {}", first.origin, last.destination))
            .unwrap_or_default();

        format!(
            "<h1>Booking Confirmed — {reference}</h1>\
             <p>{route_name}: {journey}</p>\
             <p>Vehicle: {vehicle_name}<br/>Seats: {seats}</p>\
             <h3>Passengers</h3><ul>{passengers}</ul>\
             {add_ons}\
             <p>Total paid: {total:.2}</p>",
            reference = booking.reference,
            total = booking.total_cost,
        )
    }
}

#[async_trait]
impl TicketNotifier for ResendTicketMailer {
    async fn send_ticket(&self, reference: &str) -> Result<(), NotifyError> {
        let booking = self
            .bookings
            .find_by_reference(reference)
            .await
            .map_err(|e| NotifyError(e.to_string()))?
            .ok_or_else(|| NotifyError(format!("no booking for reference {reference}")))?;

        if booking.payment_status != PaymentStatus::Paid {
            return Err(NotifyError("cannot send ticket for unpaid booking".to_string()));
        }

        let lead = booking
            .lead_passenger()
            .ok_or_else(|| NotifyError("booking has no passengers".to_string()))?;
        if !lead.email.contains('@') {
            return Err(NotifyError(format!("invalid lead passenger email: {}", lead.email)));
        }

        let detail = self
            .trips
            .get_detailed(booking.trip_id)
            .await
            .map_err(|e| NotifyError(e.to_string()))?
            .ok_or_else(|| NotifyError("booked trip no longer exists".to_string()))?;

        let request = SendEmailRequest {
            from: format!("{} <{}>", self.config.from_name, self.config.from_email),
            to: vec![lead.email.clone()],
            subject: format!(
                "Booking Confirmed - {} | {}",
                booking.reference, self.config.from_name
            ),
            html: self.render_ticket(&booking, &detail.route.name, &detail.vehicle.name),
            reply_to: self.config.reply_to.clone(),
        };

        let resp = self
            .http
            .post(format!("{}/emails", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotifyError(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError(format!("mail provider returned {status}: {body}")));
        }

        tracing::info!(reference, to = %lead.email, "ticket email sent");
        Ok(())
    }
}
