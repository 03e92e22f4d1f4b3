//! Backtracking itinerary search.
//!
//! For each blueprint path, walks the origin-indexed segments hop by hop,
//! forking a new chain for every segment whose connection time is within
//! policy, and emits every chain that reaches the end of the path.
//!
//! The search is pure: it performs no I/O and never fails. Malformed input
//! (a path with fewer than two airports) simply produces no itineraries.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::domain::{IataCode, Itinerary, Segment, TimeWindow};

use super::blueprint::BlueprintPath;
use super::config::SearchConfig;
use super::loader::SegmentIndex;

/// Depth-first itinerary search over a preloaded segment index.
pub struct ItinerarySearch<'a> {
    segments: &'a SegmentIndex,
    config: &'a SearchConfig,
}

impl<'a> ItinerarySearch<'a> {
    /// Create a search over the given segments.
    pub fn new(segments: &'a SegmentIndex, config: &'a SearchConfig) -> Self {
        Self { segments, config }
    }

    /// Find every itinerary that threads one of `paths` with a first
    /// departure inside `departure`.
    ///
    /// Results are grouped by path in input order; within a path they are
    /// in depth-first discovery order. Nothing is sorted or deduplicated.
    pub fn search(&self, paths: &[BlueprintPath], departure: &TimeWindow) -> Vec<Itinerary> {
        let mut itineraries = Vec::new();

        for path in paths {
            let before = itineraries.len();
            self.search_path(path, departure, &mut itineraries);
            debug!(
                path = %path,
                found = itineraries.len() - before,
                "searched blueprint path"
            );
        }

        itineraries
    }

    /// Seed chains with first legs departing inside the window, then
    /// extend each one along the rest of the path.
    fn search_path(
        &self,
        path: &BlueprintPath,
        departure: &TimeWindow,
        found: &mut Vec<Itinerary>,
    ) {
        let [origin, first_stop, rest @ ..] = path.airports() else {
            return;
        };

        for segment in self.segments.departures_from(origin) {
            if segment.destination != *first_stop || !departure.contains(segment.std) {
                continue;
            }

            trace!(segment = %segment.segment_number, std = %segment.std, "seed segment");
            self.extend(vec![Arc::clone(segment)], rest, found);
        }
    }

    /// Extend `chain` through `remaining` airports.
    ///
    /// Every accepted connection gets its own copy of the chain, so sibling
    /// branches never see each other's segments.
    fn extend(&self, chain: Vec<Arc<Segment>>, remaining: &[IataCode], found: &mut Vec<Itinerary>) {
        let Some((next_stop, rest)) = remaining.split_first() else {
            complete(chain, found);
            return;
        };

        // Chains are seeded with one segment and only ever grow
        let Some(last) = chain.last() else {
            return;
        };

        for segment in self.segments.departures_from(&last.destination) {
            if segment.destination != *next_stop {
                continue;
            }

            let connection = segment.connection_after(last);
            if !self.config.accepts_connection(connection) {
                trace!(
                    segment = %segment.segment_number,
                    connection_mins = connection.num_minutes(),
                    "connection outside policy"
                );
                continue;
            }

            let mut next = chain.clone();
            next.push(Arc::clone(segment));
            self.extend(next, rest, found);
        }
    }
}

/// Record a chain that has reached the end of its path.
///
/// Chains are connected by construction, so a rejected chain means the
/// search itself is broken; it is logged and dropped.
pub(super) fn complete(chain: Vec<Arc<Segment>>, found: &mut Vec<Itinerary>) {
    match Itinerary::new(chain) {
        Ok(itinerary) => found.push(itinerary),
        Err(e) => warn!(error = %e, "discarding malformed itinerary chain"),
    }
}
