//! Flight segment type.
//!
//! A `Segment` is one scheduled flight leg as stored in the schedule table.

use chrono::{DateTime, Duration, Utc};

use super::{CarrierCode, DomainError, IataCode};

/// One scheduled flight leg.
///
/// The search engine trusts that `std < sta`; only [`Segment::validated`]
/// checks it, for rows entering the store through the import path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Operating airline
    pub airline: CarrierCode,
    /// Flight number, e.g. "5203"
    pub segment_number: String,
    /// Departure airport
    pub origin: IataCode,
    /// Arrival airport
    pub destination: IataCode,
    /// Scheduled time of departure (UTC)
    pub std: DateTime<Utc>,
    /// Scheduled time of arrival (UTC)
    pub sta: DateTime<Utc>,
}

impl Segment {
    /// Creates a segment without validating its schedule.
    pub fn new(
        airline: CarrierCode,
        segment_number: impl Into<String>,
        origin: IataCode,
        destination: IataCode,
        std: DateTime<Utc>,
        sta: DateTime<Utc>,
    ) -> Self {
        Self {
            airline,
            segment_number: segment_number.into(),
            origin,
            destination,
            std,
            sta,
        }
    }

    /// Creates a segment, rejecting inconsistent data.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - the flight number is blank
    /// - origin and destination are the same airport
    /// - the arrival is not strictly after the departure
    pub fn validated(
        airline: CarrierCode,
        segment_number: impl Into<String>,
        origin: IataCode,
        destination: IataCode,
        std: DateTime<Utc>,
        sta: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let segment_number = segment_number.into();
        if segment_number.trim().is_empty() {
            return Err(DomainError::InvalidSegment("segment number is blank"));
        }
        if origin == destination {
            return Err(DomainError::InvalidSegment(
                "origin and destination must differ",
            ));
        }
        if sta <= std {
            return Err(DomainError::InvalidSegment("arrival must be after departure"));
        }

        Ok(Self::new(
            airline,
            segment_number,
            origin,
            destination,
            std,
            sta,
        ))
    }

    /// Returns the ground time between arriving on `previous` and departing
    /// on this segment.
    ///
    /// Negative if this segment leaves before `previous` lands.
    pub fn connection_after(&self, previous: &Segment) -> Duration {
        self.std.signed_duration_since(previous.sta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn iata(s: &str) -> IataCode {
        IataCode::parse(s).unwrap()
    }

    fn carrier() -> CarrierCode {
        CarrierCode::parse("S7").unwrap()
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap()
    }

    #[test]
    fn connection_after_previous() {
        let first = Segment::new(carrier(), "100", iata("UUS"), iata("OVB"), at(1, 8), at(1, 14));
        let second = Segment::new(carrier(), "200", iata("OVB"), iata("DME"), at(2, 0), at(2, 4));

        assert_eq!(second.connection_after(&first), Duration::hours(10));
        assert_eq!(first.connection_after(&second), Duration::hours(-20));
    }

    #[test]
    fn validated_accepts_consistent_segment() {
        let segment =
            Segment::validated(carrier(), "100", iata("UUS"), iata("DME"), at(1, 8), at(1, 16))
                .unwrap();
        assert_eq!(segment.segment_number, "100");
    }

    #[test]
    fn validated_rejects_arrival_before_departure() {
        let result =
            Segment::validated(carrier(), "100", iata("UUS"), iata("DME"), at(1, 8), at(1, 8));
        assert!(matches!(result, Err(DomainError::InvalidSegment(_))));
    }

    #[test]
    fn validated_rejects_same_airport() {
        let result =
            Segment::validated(carrier(), "100", iata("UUS"), iata("UUS"), at(1, 8), at(1, 9));
        assert!(result.is_err());
    }

    #[test]
    fn validated_rejects_blank_number() {
        let result =
            Segment::validated(carrier(), "  ", iata("UUS"), iata("DME"), at(1, 8), at(1, 9));
        assert!(result.is_err());
    }
}
