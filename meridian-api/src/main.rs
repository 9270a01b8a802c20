use std::net::SocketAddr;
use std::sync::Arc;

use meridian_api::{app, state::AuthConfig, AppState};
use meridian_core::intake::BookingIntake;
use meridian_core::reconcile::PaymentReconciler;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meridian_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = meridian_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Meridian API on port {}", config.server.port);

    let db = meridian_store::DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let routes = Arc::new(meridian_store::PgRouteRepository::new(db.pool.clone()));
    let vehicles = Arc::new(meridian_store::PgVehicleRepository::new(db.pool.clone()));
    let drivers = Arc::new(meridian_store::PgDriverRepository::new(db.pool.clone()));
    let trips: Arc<dyn meridian_core::TripRepository> =
        Arc::new(meridian_store::PgTripRepository::new(db.pool.clone()));
    let add_ons: Arc<dyn meridian_core::AddOnRepository> =
        Arc::new(meridian_store::PgAddOnRepository::new(db.pool.clone()));
    let bookings: Arc<dyn meridian_core::BookingRepository> =
        Arc::new(meridian_store::PgBookingRepository::new(db.pool.clone()));

    let gateway: Arc<dyn meridian_core::gateway::PaymentGateway> =
        Arc::new(meridian_store::PaystackClient::new(config.paystack.clone()));
    let notifier: Arc<dyn meridian_core::notify::TicketNotifier> = Arc::new(
        meridian_store::ResendTicketMailer::new(config.mail.clone(), bookings.clone(), trips.clone()),
    );

    let intake = Arc::new(BookingIntake::new(
        trips.clone(),
        bookings.clone(),
        add_ons.clone(),
        gateway.clone(),
    ));
    let reconciler =
        Arc::new(PaymentReconciler::new(bookings.clone(), trips.clone(), notifier.clone()));

    let app_state = AppState {
        routes,
        vehicles,
        drivers,
        trips,
        add_ons,
        bookings,
        gateway,
        notifier,
        intake,
        reconciler,
        auth: AuthConfig { secret: config.auth.jwt_secret.clone() },
        webhook_secret: config.paystack.secret_key.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
