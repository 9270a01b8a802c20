pub mod addon_repo;
pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod driver_repo;
pub mod mailer;
pub mod paystack;
pub mod route_repo;
mod rows;
pub mod trip_repo;
pub mod vehicle_repo;

pub use addon_repo::PgAddOnRepository;
pub use booking_repo::PgBookingRepository;
pub use database::DbClient;
pub use driver_repo::PgDriverRepository;
pub use mailer::ResendTicketMailer;
pub use paystack::PaystackClient;
pub use route_repo::PgRouteRepository;
pub use trip_repo::PgTripRepository;
pub use vehicle_repo::PgVehicleRepository;
