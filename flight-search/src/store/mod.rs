//! Schedule store capability.
//!
//! The search core only ever needs two lookups from the relational store:
//! "find a permitted route" and "find segments for an airline, a set of
//! origin airports and a departure window". The import endpoints add two
//! upserts. [`FlightStore`] captures exactly that, so the planner can run
//! against PostgreSQL in production and an in-memory store in tests.

mod error;
mod memory;
mod postgres;

use std::collections::BTreeSet;
use std::future::Future;

use crate::domain::{CarrierCode, IataCode, PermittedRoute, Segment, TimeWindow};

pub use error::StoreError;
pub use memory::InMemoryStore;
pub use postgres::PgStore;

/// Read and write access to permitted routes and flight segments.
///
/// Implementations must be safe for concurrent use by simultaneous
/// requests.
pub trait FlightStore: Send + Sync {
    /// Find the permitted route for a carrier between two airports.
    ///
    /// Returns `Ok(None)` when no route exists.
    fn find_permitted_route(
        &self,
        carrier: &CarrierCode,
        origin: &IataCode,
        destination: &IataCode,
    ) -> impl Future<Output = Result<Option<PermittedRoute>, StoreError>> + Send;

    /// Find every segment flown by `carrier` whose origin is in `origins`
    /// and whose scheduled departure lies within `window` (inclusive).
    fn find_segments(
        &self,
        carrier: &CarrierCode,
        origins: &BTreeSet<IataCode>,
        window: &TimeWindow,
    ) -> impl Future<Output = Result<Vec<Segment>, StoreError>> + Send;

    /// Insert or replace the route keyed by (carrier, origin, destination).
    fn upsert_permitted_route(
        &self,
        route: &PermittedRoute,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Insert or replace the segment keyed by (airline, segment number, STD).
    fn upsert_segment(
        &self,
        segment: &Segment,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
