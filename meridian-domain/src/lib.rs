pub mod addon;
pub mod booking;
pub mod driver;
pub mod route;
pub mod trip;
pub mod vehicle;

pub use addon::{AddOn, PricingType};
pub use booking::{BookedAddOn, BookedSegment, Booking, Passenger, PaymentMethod, PaymentStatus};
pub use driver::Driver;
pub use route::{Route, Segment, TransportMode};
pub use trip::{Trip, TripStatus};
pub use vehicle::Vehicle;
