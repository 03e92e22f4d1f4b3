//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from store and HTTP errors.

use super::IataCode;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Segment data is inconsistent
    #[error("invalid segment: {0}")]
    InvalidSegment(&'static str),

    /// Consecutive segments don't share an airport
    #[error("segments do not connect: arrives at {0}, next departs from {1}")]
    AirportsNotConnected(IataCode, IataCode),

    /// Itinerary has no segments
    #[error("itinerary must have at least one segment")]
    EmptyItinerary,
}
