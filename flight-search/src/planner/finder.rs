//! Request-level itinerary finding.
//!
//! Runs one search request end to end: permitted route lookup, template
//! expansion, a single segment load, and the in-memory search.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::{CarrierCode, IataCode, Itinerary, TimeWindow};
use crate::store::{FlightStore, StoreError};

use super::blueprint::{BlueprintPath, expand};
use super::config::SearchConfig;
use super::loader::load_segments;
use super::search::ItinerarySearch;

/// Error from itinerary finding.
///
/// "No route" and "no flights" are not errors; they produce an empty
/// [`SearchOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The store failed; the result would be unreliable
    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),
}

/// Request for itinerary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Carrier whose routes and flights are searched.
    pub carrier: CarrierCode,

    /// Origin airport.
    pub origin: IataCode,

    /// Destination airport.
    pub destination: IataCode,

    /// Window the first leg must depart in, bounds included.
    pub departure: TimeWindow,

    /// Upper bound on intermediate airports, if any.
    pub max_transfers: Option<usize>,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(
        carrier: CarrierCode,
        origin: IataCode,
        destination: IataCode,
        departure: TimeWindow,
    ) -> Self {
        Self {
            carrier,
            origin,
            destination,
            departure,
            max_transfers: None,
        }
    }

    /// Create a request covering whole departure dates, `from` through `to`.
    pub fn for_dates(
        carrier: CarrierCode,
        origin: IataCode,
        destination: IataCode,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Self, SearchError> {
        if to < from {
            return Err(SearchError::InvalidRequest(
                "departure_to can't be before departure_from".to_string(),
            ));
        }

        Ok(Self::new(
            carrier,
            origin,
            destination,
            TimeWindow::from_dates(from, to),
        ))
    }

    /// Limit the number of intermediate airports.
    pub fn with_max_transfers(mut self, max_transfers: usize) -> Self {
        self.max_transfers = Some(max_transfers);
        self
    }
}

/// Result of itinerary finding.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Found itineraries, grouped by blueprint path.
    pub itineraries: Vec<Itinerary>,

    /// Number of blueprint paths searched.
    pub paths_searched: usize,

    /// Number of segments loaded from the store.
    pub segments_loaded: usize,
}

impl SearchOutcome {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Finds itineraries for search requests against a store.
pub struct ItineraryFinder<'a, S: FlightStore> {
    store: &'a S,
    config: &'a SearchConfig,
}

impl<'a, S: FlightStore> ItineraryFinder<'a, S> {
    /// Create a new finder.
    pub fn new(store: &'a S, config: &'a SearchConfig) -> Self {
        Self { store, config }
    }

    /// Find every itinerary satisfying `request`.
    ///
    /// # Errors
    ///
    /// Returns `Err` only when the store fails. A missing permitted route,
    /// a route with no usable paths, or no matching flights all yield an
    /// empty outcome.
    pub async fn find(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        let Some(route) = self
            .store
            .find_permitted_route(&request.carrier, &request.origin, &request.destination)
            .await?
        else {
            info!(
                carrier = %request.carrier,
                origin = %request.origin,
                destination = %request.destination,
                "no permitted route"
            );
            return Ok(SearchOutcome::empty());
        };

        let expansion = expand(&route);
        if !expansion.skipped_codes.is_empty() {
            warn!(
                carrier = %route.carrier,
                origin = %route.origin,
                destination = %route.destination,
                codes = ?expansion.skipped_codes,
                "permitted route has malformed transfer codes"
            );
        }

        let paths: Vec<BlueprintPath> = expansion
            .paths
            .into_iter()
            .filter(|p| {
                request
                    .max_transfers
                    .is_none_or(|max| p.transfer_count() <= max)
            })
            .collect();

        if paths.is_empty() {
            info!(
                carrier = %route.carrier,
                origin = %route.origin,
                destination = %route.destination,
                "permitted route yields no blueprint paths"
            );
            return Ok(SearchOutcome::empty());
        }

        let segments = load_segments(
            self.store,
            &request.carrier,
            &paths,
            &request.departure,
            self.config,
        )
        .await?;

        let itineraries = ItinerarySearch::new(&segments, self.config).search(&paths, &request.departure);

        info!(
            carrier = %request.carrier,
            origin = %request.origin,
            destination = %request.destination,
            paths = paths.len(),
            segments = segments.len(),
            itineraries = itineraries.len(),
            "itinerary search complete"
        );

        Ok(SearchOutcome {
            itineraries,
            paths_searched: paths.len(),
            segments_loaded: segments.len(),
        })
    }
}
