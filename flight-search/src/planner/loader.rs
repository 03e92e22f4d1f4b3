//! Segment loading.
//!
//! Fetches every segment the search could possibly use in one store round
//! trip and indexes it by origin airport.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::debug;

use crate::domain::{CarrierCode, IataCode, Segment, TimeWindow};
use crate::store::{FlightStore, StoreError};

use super::blueprint::BlueprintPath;
use super::config::SearchConfig;

/// Segments grouped by origin airport.
///
/// Within each group, segments keep the order the store returned them in.
#[derive(Debug, Clone, Default)]
pub struct SegmentIndex {
    by_origin: HashMap<IataCode, Vec<Arc<Segment>>>,
    len: usize,
}

impl SegmentIndex {
    /// Build an index from segments in store order.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        let mut index = Self::default();
        for segment in segments {
            index
                .by_origin
                .entry(segment.origin)
                .or_default()
                .push(Arc::new(segment));
            index.len += 1;
        }
        index
    }

    /// Segments departing from `airport`; empty if there are none.
    pub fn departures_from(&self, airport: &IataCode) -> &[Arc<Segment>] {
        self.by_origin
            .get(airport)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of indexed segments.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no segments are indexed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Every airport appearing in any of the paths, deduplicated.
pub fn airports_in(paths: &[BlueprintPath]) -> BTreeSet<IataCode> {
    paths
        .iter()
        .flat_map(|p| p.airports().iter().copied())
        .collect()
}

/// The window the loader queries: the requested departure window with its
/// end pushed back by the configured look-ahead, so onward legs of an
/// itinerary whose first leg leaves late in the window are included.
pub fn loading_window(departure: &TimeWindow, config: &SearchConfig) -> TimeWindow {
    departure.extend_end(config.lookahead())
}

/// Load and index the segments needed to search `paths`.
///
/// Makes exactly one store call. Store failures are returned unchanged.
pub async fn load_segments<S: FlightStore>(
    store: &S,
    carrier: &CarrierCode,
    paths: &[BlueprintPath],
    departure: &TimeWindow,
    config: &SearchConfig,
) -> Result<SegmentIndex, StoreError> {
    let airports = airports_in(paths);
    let window = loading_window(departure, config);

    debug!(
        carrier = %carrier,
        airports = airports.len(),
        from = %window.start(),
        to = %window.end(),
        "loading segments"
    );

    let segments = store.find_segments(carrier, &airports, &window).await?;
    Ok(SegmentIndex::from_segments(segments))
}
