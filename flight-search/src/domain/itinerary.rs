//! Itinerary type.
//!
//! An `Itinerary` is a complete trip from origin to destination made of
//! one or more flight segments flown in order.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::{DomainError, IataCode, Segment};

/// A complete chain of flight segments.
///
/// Segments are shared via `Arc` because the search engine forks a new
/// chain for every candidate connection; sibling chains share the segments
/// they have in common.
///
/// # Invariants
///
/// - At least one segment
/// - Consecutive segments connect (destination of one = origin of next)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    segments: Vec<Arc<Segment>>,
}

impl Itinerary {
    /// Constructs an itinerary from segments in flying order.
    ///
    /// Connection times are not checked here; the search engine applies
    /// its connection policy before building an itinerary.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - Segments list is empty
    /// - Segments don't connect (destination != next origin)
    ///
    /// # Examples
    ///
    /// ```
    /// use flight_search::domain::{CarrierCode, IataCode, Itinerary, Segment};
    /// use chrono::{TimeZone, Utc};
    /// use std::sync::Arc;
    ///
    /// let s7 = CarrierCode::parse("S7").unwrap();
    /// let uus = IataCode::parse("UUS").unwrap();
    /// let dme = IataCode::parse("DME").unwrap();
    ///
    /// let segment = Segment::new(
    ///     s7,
    ///     "5203",
    ///     uus,
    ///     dme,
    ///     Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
    ///     Utc.with_ymd_and_hms(2024, 1, 1, 16, 30, 0).unwrap(),
    /// );
    ///
    /// let itinerary = Itinerary::new(vec![Arc::new(segment)]).unwrap();
    /// assert_eq!(itinerary.origin(), &uus);
    /// assert_eq!(itinerary.destination(), &dme);
    /// assert_eq!(itinerary.transfer_count(), 0);
    /// ```
    pub fn new(segments: Vec<Arc<Segment>>) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }

        for window in segments.windows(2) {
            let arrived_at = window[0].destination;
            let departs_from = window[1].origin;
            if arrived_at != departs_from {
                return Err(DomainError::AirportsNotConnected(arrived_at, departs_from));
            }
        }

        Ok(Itinerary { segments })
    }

    /// Returns all segments in order.
    pub fn segments(&self) -> &[Arc<Segment>] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the number of intermediate stops.
    pub fn transfer_count(&self) -> usize {
        self.segments.len() - 1
    }

    /// Returns true if this is a non-stop itinerary.
    pub fn is_direct(&self) -> bool {
        self.segments.len() == 1
    }

    fn first(&self) -> &Segment {
        // Non-empty by construction
        &self.segments[0]
    }

    fn last(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    /// Returns the origin airport.
    pub fn origin(&self) -> &IataCode {
        &self.first().origin
    }

    /// Returns the final destination airport.
    pub fn destination(&self) -> &IataCode {
        &self.last().destination
    }

    /// Returns the departure time of the first segment.
    pub fn departure_time(&self) -> DateTime<Utc> {
        self.first().std
    }

    /// Returns the arrival time of the last segment.
    pub fn arrival_time(&self) -> DateTime<Utc> {
        self.last().sta
    }

    /// Returns the total trip time including ground time.
    pub fn total_duration(&self) -> Duration {
        self.arrival_time()
            .signed_duration_since(self.departure_time())
    }

    /// Returns the ground time at each transfer airport, in order.
    pub fn connection_times(&self) -> impl Iterator<Item = Duration> + '_ {
        self.segments
            .windows(2)
            .map(|pair| pair[1].connection_after(&pair[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CarrierCode;
    use chrono::TimeZone;

    fn iata(s: &str) -> IataCode {
        IataCode::parse(s).unwrap()
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap()
    }

    fn seg(number: &str, from: &str, to: &str, std: DateTime<Utc>, sta: DateTime<Utc>) -> Arc<Segment> {
        Arc::new(Segment::new(
            CarrierCode::parse("S7").unwrap(),
            number,
            iata(from),
            iata(to),
            std,
            sta,
        ))
    }

    #[test]
    fn single_segment_itinerary() {
        let itinerary = Itinerary::new(vec![seg("1", "UUS", "DME", at(1, 8), at(1, 16))]).unwrap();

        assert_eq!(itinerary.segment_count(), 1);
        assert_eq!(itinerary.transfer_count(), 0);
        assert!(itinerary.is_direct());
        assert_eq!(itinerary.origin(), &iata("UUS"));
        assert_eq!(itinerary.destination(), &iata("DME"));
        assert_eq!(itinerary.departure_time(), at(1, 8));
        assert_eq!(itinerary.arrival_time(), at(1, 16));
        assert_eq!(itinerary.total_duration(), Duration::hours(8));
        assert_eq!(itinerary.connection_times().count(), 0);
    }

    #[test]
    fn multi_segment_itinerary() {
        let itinerary = Itinerary::new(vec![
            seg("1", "UUS", "VVO", at(1, 8), at(1, 10)),
            seg("2", "VVO", "OVB", at(1, 20), at(2, 2)),
            seg("3", "OVB", "DME", at(2, 12), at(2, 16)),
        ])
        .unwrap();

        assert_eq!(itinerary.transfer_count(), 2);
        assert!(!itinerary.is_direct());
        assert_eq!(itinerary.origin(), &iata("UUS"));
        assert_eq!(itinerary.destination(), &iata("DME"));
        assert_eq!(itinerary.total_duration(), Duration::hours(32));

        let connections: Vec<Duration> = itinerary.connection_times().collect();
        assert_eq!(connections, vec![Duration::hours(10), Duration::hours(10)]);
    }

    #[test]
    fn empty_itinerary_rejected() {
        assert!(matches!(
            Itinerary::new(vec![]),
            Err(DomainError::EmptyItinerary)
        ));
    }

    #[test]
    fn disconnected_segments_rejected() {
        let result = Itinerary::new(vec![
            seg("1", "UUS", "OVB", at(1, 8), at(1, 12)),
            seg("2", "VVO", "DME", at(2, 0), at(2, 4)),
        ]);

        match result {
            Err(DomainError::AirportsNotConnected(a, b)) => {
                assert_eq!(a, iata("OVB"));
                assert_eq!(b, iata("VVO"));
            }
            other => panic!("expected AirportsNotConnected, got {:?}", other),
        }
    }
}
