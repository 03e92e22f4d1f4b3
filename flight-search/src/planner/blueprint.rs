//! Route-template expansion.
//!
//! Turns a carrier's [`PermittedRoute`] into the airport sequences
//! ("blueprint paths") the search engine has to fill with real flights.

use std::fmt;

use crate::domain::{IataCode, PermittedRoute};

/// An ordered sequence of airports one itinerary must visit.
///
/// A well-formed path has at least two airports: origin and destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlueprintPath(Vec<IataCode>);

impl BlueprintPath {
    /// Create a path from airports in visiting order.
    pub fn new(airports: Vec<IataCode>) -> Self {
        Self(airports)
    }

    /// Returns the airports in visiting order.
    pub fn airports(&self) -> &[IataCode] {
        &self.0
    }

    /// Returns the number of airports.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the path has no airports.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of intermediate airports.
    pub fn transfer_count(&self) -> usize {
        self.0.len().saturating_sub(2)
    }
}

impl fmt::Display for BlueprintPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, airport) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            f.write_str(airport.as_str())?;
        }
        Ok(())
    }
}

/// Result of expanding a permitted route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    /// Paths in route order: the direct path first, then one per usable
    /// transfer code.
    pub paths: Vec<BlueprintPath>,

    /// Transfer codes that could not be split into airport codes.
    pub skipped_codes: Vec<String>,
}

/// Split an encoded transfer code into its airports.
///
/// Returns `None` unless the code is a non-empty concatenation of 3-letter
/// airport codes. Letters are upper-cased. A code whose length is right but
/// which contains a chunk such as `"OV1"` is rejected too: no stored segment
/// can use that airport, so the path could never produce an itinerary.
///
/// # Examples
///
/// ```
/// use flight_search::planner::split_transfer_code;
///
/// let stops = split_transfer_code("VVOOVB").unwrap();
/// let names: Vec<&str> = stops.iter().map(|c| c.as_str()).collect();
/// assert_eq!(names, vec!["VVO", "OVB"]);
///
/// assert!(split_transfer_code("VVOOV").is_none());
/// assert!(split_transfer_code("").is_none());
/// ```
pub fn split_transfer_code(code: &str) -> Option<Vec<IataCode>> {
    let bytes = code.as_bytes();
    if bytes.is_empty() || bytes.len() % 3 != 0 {
        return None;
    }

    bytes
        .chunks(3)
        .map(|chunk| {
            let chunk = std::str::from_utf8(chunk).ok()?;
            IataCode::parse_normalized(chunk).ok()
        })
        .collect()
}

/// Expand a permitted route into blueprint paths.
///
/// - A direct route contributes `[origin, destination]`.
/// - Each well-formed transfer code contributes
///   `[origin, stop_1, ..., stop_k, destination]`.
/// - Malformed transfer codes are skipped and reported in
///   [`Expansion::skipped_codes`].
/// - A path that is already present is not repeated.
pub fn expand(route: &PermittedRoute) -> Expansion {
    let mut expansion = Expansion::default();

    if route.direct {
        expansion
            .paths
            .push(BlueprintPath::new(vec![route.origin, route.destination]));
    }

    for code in &route.transfer_codes {
        let Some(stops) = split_transfer_code(code) else {
            expansion.skipped_codes.push(code.clone());
            continue;
        };

        let mut airports = Vec::with_capacity(stops.len() + 2);
        airports.push(route.origin);
        airports.extend(stops);
        airports.push(route.destination);

        // A repeated code would only repeat every itinerary of its path
        let path = BlueprintPath::new(airports);
        if !expansion.paths.contains(&path) {
            expansion.paths.push(path);
        }
    }

    expansion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CarrierCode;

    fn iata(s: &str) -> IataCode {
        IataCode::parse(s).unwrap()
    }

    fn route(direct: bool, codes: &[&str]) -> PermittedRoute {
        PermittedRoute::with_transfers(
            CarrierCode::parse("S7").unwrap(),
            iata("UUS"),
            iata("DME"),
            direct,
            codes.iter().copied(),
        )
    }

    fn path(codes: &[&str]) -> BlueprintPath {
        BlueprintPath::new(codes.iter().map(|c| iata(c)).collect())
    }

    #[test]
    fn direct_only() {
        let expansion = expand(&route(true, &[]));

        assert_eq!(expansion.paths, vec![path(&["UUS", "DME"])]);
        assert!(expansion.skipped_codes.is_empty());
    }

    #[test]
    fn direct_and_transfers_in_order() {
        let expansion = expand(&route(true, &["OVB", "VVOOVB"]));

        assert_eq!(
            expansion.paths,
            vec![
                path(&["UUS", "DME"]),
                path(&["UUS", "OVB", "DME"]),
                path(&["UUS", "VVO", "OVB", "DME"]),
            ]
        );
    }

    #[test]
    fn not_direct_without_valid_codes_yields_nothing() {
        let expansion = expand(&route(false, &[]));
        assert!(expansion.paths.is_empty());

        let expansion = expand(&route(false, &["OV", "OVBK", ""]));
        assert!(expansion.paths.is_empty());
        assert_eq!(expansion.skipped_codes, vec!["OV", "OVBK", ""]);
    }

    #[test]
    fn malformed_codes_skipped_without_affecting_others() {
        let expansion = expand(&route(false, &["OVBX", "OVB", "1AB"]));

        assert_eq!(expansion.paths, vec![path(&["UUS", "OVB", "DME"])]);
        assert_eq!(expansion.skipped_codes, vec!["OVBX", "1AB"]);
    }

    #[test]
    fn lowercase_codes_normalized() {
        let expansion = expand(&route(false, &["ovbvvo"]));
        assert_eq!(expansion.paths, vec![path(&["UUS", "OVB", "VVO", "DME"])]);
    }

    #[test]
    fn duplicate_codes_expand_once() {
        let expansion = expand(&route(false, &["OVB", "OVB"]));
        assert_eq!(expansion.paths.len(), 1);

        // Same path reached via differently cased codes
        let expansion = expand(&route(true, &["ovb", "VVO", "OVB"]));
        assert_eq!(
            expansion.paths,
            vec![
                path(&["UUS", "DME"]),
                path(&["UUS", "OVB", "DME"]),
                path(&["UUS", "VVO", "DME"]),
            ]
        );
        assert!(expansion.skipped_codes.is_empty());
    }

    #[test]
    fn path_accessors_and_display() {
        let p = path(&["UUS", "VVO", "OVB", "DME"]);

        assert_eq!(p.len(), 4);
        assert!(!p.is_empty());
        assert_eq!(p.transfer_count(), 2);
        assert_eq!(p.to_string(), "UUS-VVO-OVB-DME");
        assert_eq!(path(&["UUS", "DME"]).transfer_count(), 0);
        assert_eq!(BlueprintPath::new(vec![]).transfer_count(), 0);
    }

    #[test]
    fn non_letter_chunks_skipped() {
        let expansion = expand(&route(true, &["OV1", "OVB"]));

        assert_eq!(
            expansion.paths,
            vec![path(&["UUS", "DME"]), path(&["UUS", "OVB", "DME"])]
        );
        assert_eq!(expansion.skipped_codes, vec!["OV1"]);
        assert!(split_transfer_code("OVB12A").is_none());
    }

    #[test]
    fn split_rejects_non_multiple_of_three() {
        assert!(split_transfer_code("A").is_none());
        assert!(split_transfer_code("ABCD").is_none());
        assert!(split_transfer_code("ABCDEFG").is_none());
    }
}
