//! Data transfer objects for web requests and responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CarrierCode, IataCode, Itinerary, Segment};
use crate::import::{ImportReport, PermittedRouteRow, SegmentRow};
use crate::planner::SearchRequest;

/// Query parameters for itinerary search.
///
/// Fields are kept as raw strings so that every validation failure can be
/// reported the same way.
#[derive(Debug, Default, Deserialize)]
pub struct RouteSearchParams {
    /// Carrier code (e.g., "S7")
    pub carrier: Option<String>,

    /// Origin airport IATA code
    #[serde(alias = "origin")]
    pub origin_iata: Option<String>,

    /// Destination airport IATA code
    #[serde(alias = "destination")]
    pub destination_iata: Option<String>,

    /// First departure date, YYYY-MM-DD
    pub departure_from: Option<String>,

    /// Last departure date, YYYY-MM-DD
    pub departure_to: Option<String>,

    /// Optional cap on intermediate airports
    pub max_transfers: Option<String>,
}

fn required<'a>(name: &str, value: &'a Option<String>) -> Result<&'a str, String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("{name} is required"))
}

fn date(name: &str, value: &Option<String>) -> Result<NaiveDate, String> {
    let raw = required(name, value)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("{name} must be a date in YYYY-MM-DD format, got {raw:?}"))
}

impl RouteSearchParams {
    /// Validate the parameters and build a search request.
    pub fn into_request(self) -> Result<SearchRequest, String> {
        let carrier = required("carrier", &self.carrier)?;
        let carrier = CarrierCode::parse_normalized(carrier)
            .map_err(|e| format!("carrier: {e}"))?;

        let origin = required("origin_iata", &self.origin_iata)?;
        let origin =
            IataCode::parse_normalized(origin).map_err(|e| format!("origin_iata: {e}"))?;

        let destination = required("destination_iata", &self.destination_iata)?;
        let destination = IataCode::parse_normalized(destination)
            .map_err(|e| format!("destination_iata: {e}"))?;

        let from = date("departure_from", &self.departure_from)?;
        let to = date("departure_to", &self.departure_to)?;

        let request = SearchRequest::for_dates(carrier, origin, destination, from, to)
            .map_err(|e| e.to_string())?;

        match self.max_transfers.as_deref().map(str::trim) {
            None | Some("") => Ok(request),
            Some(raw) => {
                let max = raw.parse::<usize>().map_err(|_| {
                    format!("max_transfers must be a non-negative integer, got {raw:?}")
                })?;
                Ok(request.with_max_transfers(max))
            }
        }
    }
}

/// Response for itinerary search.
#[derive(Debug, Serialize)]
pub struct RouteSearchResponse {
    /// Found itineraries, grouped by routing
    pub itineraries: Vec<ItineraryResult>,
}

/// One itinerary option.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    pub origin_iata: String,
    pub destination_iata: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,

    /// Total trip time including ground time
    pub duration_mins: i64,

    /// Number of intermediate airports
    pub transfers: usize,

    pub segments: Vec<SegmentResult>,
}

/// One flight of an itinerary.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    pub carrier: String,
    pub segment_number: String,
    pub origin_iata: String,
    pub destination_iata: String,
    pub std: DateTime<Utc>,
    pub sta: DateTime<Utc>,
}

/// Request to import permitted routes.
#[derive(Debug, Deserialize)]
pub struct ImportRoutesRequest {
    #[serde(default)]
    pub routes: Vec<PermittedRouteRow>,
}

/// Request to import flight segments.
#[derive(Debug, Deserialize)]
pub struct ImportSegmentsRequest {
    #[serde(default)]
    pub segments: Vec<SegmentRow>,
}

/// Response for an import.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    /// Rows written
    pub imported_count: usize,

    /// Rejected rows; omitted when everything was imported
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<RowErrorResult>,
}

/// A rejected import row.
#[derive(Debug, Serialize)]
pub struct RowErrorResult {
    pub index: usize,
    pub error: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl ItineraryResult {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            origin_iata: itinerary.origin().to_string(),
            destination_iata: itinerary.destination().to_string(),
            departure_time: itinerary.departure_time(),
            arrival_time: itinerary.arrival_time(),
            duration_mins: itinerary.total_duration().num_minutes(),
            transfers: itinerary.transfer_count(),
            segments: itinerary
                .segments()
                .iter()
                .map(|s| SegmentResult::from_segment(s))
                .collect(),
        }
    }
}

impl SegmentResult {
    /// Create from a domain Segment.
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            carrier: segment.airline.to_string(),
            segment_number: segment.segment_number.clone(),
            origin_iata: segment.origin.to_string(),
            destination_iata: segment.destination.to_string(),
            std: segment.std,
            sta: segment.sta,
        }
    }
}

impl From<ImportReport> for ImportResponse {
    fn from(report: ImportReport) -> Self {
        Self {
            imported_count: report.imported_count,
            errors: report
                .errors
                .into_iter()
                .map(|e| RowErrorResult {
                    index: e.index,
                    error: e.error,
                })
                .collect(),
        }
    }
}
