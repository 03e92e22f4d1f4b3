//! Domain types for flight itinerary search.
//!
//! This module contains the core domain model types that represent
//! validated schedule data. Code and schedule types enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod airport;
mod carrier;
mod error;
mod itinerary;
mod route;
mod segment;
mod window;

pub use airport::{IataCode, InvalidIata};
pub use carrier::{CarrierCode, InvalidCarrier};
pub use error::DomainError;
pub use itinerary::Itinerary;
pub use route::PermittedRoute;
pub use segment::Segment;
pub use window::TimeWindow;
