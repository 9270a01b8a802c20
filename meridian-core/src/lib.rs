pub mod gateway;
pub mod intake;
pub mod memory;
pub mod notify;
pub mod pricing;
pub mod reconcile;
pub mod reference;
pub mod repository;

#[cfg(test)]
pub(crate) mod testutil;

pub use repository::{
    AddOnRepository, BookingRepository, DriverRepository, Paginated, RepoError, RepoResult,
    RouteRepository, TripDetail, TripRepository, VehicleRepository,
};
