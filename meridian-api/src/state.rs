use std::sync::Arc;

use meridian_core::gateway::PaymentGateway;
use meridian_core::intake::BookingIntake;
use meridian_core::notify::TicketNotifier;
use meridian_core::reconcile::PaymentReconciler;
use meridian_core::{
    AddOnRepository, BookingRepository, DriverRepository, RouteRepository, TripRepository,
    VehicleRepository,
};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<dyn RouteRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub trips: Arc<dyn TripRepository>,
    pub add_ons: Arc<dyn AddOnRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub notifier: Arc<dyn TicketNotifier>,
    pub intake: Arc<BookingIntake>,
    pub reconciler: Arc<PaymentReconciler>,
    pub auth: AuthConfig,
    /// Shared secret the provider signs webhook bodies with.
    pub webhook_secret: String,
}
