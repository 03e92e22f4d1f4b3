//! Bulk import of permitted routes and flight segments.
//!
//! Rows arrive loosely typed from the admin API. Each row is validated on
//! its own: a bad row is reported by index and skipped, while the good
//! rows are still written. A store failure aborts the whole import.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{CarrierCode, IataCode, PermittedRoute, Segment};
use crate::store::{FlightStore, StoreError};

/// A permitted route as submitted for import.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermittedRouteRow {
    pub carrier: Option<String>,
    pub origin_iata: Option<String>,
    pub destination_iata: Option<String>,
    /// Defaults to `true` when absent
    pub direct: Option<bool>,
    pub transfer_iata_codes: Option<Vec<String>>,
}

/// A flight segment as submitted for import.
///
/// `std` and `sta` are RFC 3339 timestamps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SegmentRow {
    pub airline: Option<String>,
    pub segment_number: Option<String>,
    pub origin_iata: Option<String>,
    pub destination_iata: Option<String>,
    pub std: Option<String>,
    pub sta: Option<String>,
}

/// A rejected row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// Position of the row in the submitted list
    pub index: usize,
    /// Why the row was rejected
    pub error: String,
}

/// Outcome of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows written to the store
    pub imported_count: usize,
    /// Rows rejected by validation, in submission order
    pub errors: Vec<RowError>,
}

impl ImportReport {
    /// Returns true if every row was imported.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    fn reject(&mut self, index: usize, error: String) {
        self.errors.push(RowError { index, error });
    }
}

/// Validate and upsert permitted routes.
///
/// # Errors
///
/// Returns `Err` only if the store fails; invalid rows are reported in the
/// returned [`ImportReport`].
pub async fn import_permitted_routes<S: FlightStore>(
    store: &S,
    rows: &[PermittedRouteRow],
) -> Result<ImportReport, StoreError> {
    let mut report = ImportReport::default();

    for (index, row) in rows.iter().enumerate() {
        match parse_route(row) {
            Ok(route) => {
                store.upsert_permitted_route(&route).await?;
                report.imported_count += 1;
            }
            Err(error) => report.reject(index, error),
        }
    }

    log_report("permitted routes", rows.len(), &report);
    Ok(report)
}

/// Validate and upsert flight segments.
///
/// # Errors
///
/// Returns `Err` only if the store fails; invalid rows are reported in the
/// returned [`ImportReport`].
pub async fn import_segments<S: FlightStore>(
    store: &S,
    rows: &[SegmentRow],
) -> Result<ImportReport, StoreError> {
    let mut report = ImportReport::default();

    for (index, row) in rows.iter().enumerate() {
        match parse_segment(row) {
            Ok(segment) => {
                store.upsert_segment(&segment).await?;
                report.imported_count += 1;
            }
            Err(error) => report.reject(index, error),
        }
    }

    log_report("segments", rows.len(), &report);
    Ok(report)
}

fn log_report(kind: &str, submitted: usize, report: &ImportReport) {
    if report.is_complete() {
        info!(kind, imported = report.imported_count, "import complete");
    } else {
        warn!(
            kind,
            submitted,
            imported = report.imported_count,
            rejected = report.errors.len(),
            "import completed with rejected rows"
        );
    }
}

fn required<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str, String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("{field} is required"))
}

fn airport(field: &str, value: &Option<String>) -> Result<IataCode, String> {
    let raw = required(field, value)?;
    IataCode::parse_normalized(raw).map_err(|e| format!("{field}: {e}"))
}

fn carrier(field: &str, value: &Option<String>) -> Result<CarrierCode, String> {
    let raw = required(field, value)?;
    CarrierCode::parse_normalized(raw).map_err(|e| format!("{field}: {e}"))
}

fn timestamp(field: &str, value: &Option<String>) -> Result<DateTime<Utc>, String> {
    let raw = required(field, value)?;
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("{field}: {e}"))
}

fn parse_route(row: &PermittedRouteRow) -> Result<PermittedRoute, String> {
    let carrier = carrier("carrier", &row.carrier)?;
    let origin = airport("origin_iata", &row.origin_iata)?;
    let destination = airport("destination_iata", &row.destination_iata)?;
    if origin == destination {
        return Err("origin_iata and destination_iata must differ".to_string());
    }

    // Codes are stored as given (upper-cased); expansion decides usability
    let codes = row
        .transfer_iata_codes
        .iter()
        .flatten()
        .map(|c| c.trim().to_ascii_uppercase());

    Ok(PermittedRoute::with_transfers(
        carrier,
        origin,
        destination,
        row.direct.unwrap_or(true),
        codes,
    ))
}

fn parse_segment(row: &SegmentRow) -> Result<Segment, String> {
    let airline = carrier("airline", &row.airline)?;
    let segment_number = required("segment_number", &row.segment_number)?;
    let origin = airport("origin_iata", &row.origin_iata)?;
    let destination = airport("destination_iata", &row.destination_iata)?;
    let std = timestamp("std", &row.std)?;
    let sta = timestamp("sta", &row.sta)?;

    Segment::validated(airline, segment_number, origin, destination, std, sta)
        .map_err(|e| e.to_string())
}
