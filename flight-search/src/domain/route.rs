//! Permitted route type.

use super::{CarrierCode, IataCode};

/// A carrier-approved routing template between two airports.
///
/// `transfer_codes` holds the raw stored strings. Each one is a
/// concatenation of 3-letter intermediate airports, e.g. `"OVB"` for one
/// stop or `"VVOOVB"` for two. They are kept raw because the stored data
/// is not guaranteed to be well formed; the expander decides what to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermittedRoute {
    /// Carrier the route belongs to
    pub carrier: CarrierCode,
    /// Origin airport
    pub origin: IataCode,
    /// Destination airport
    pub destination: IataCode,
    /// Whether a non-stop flight is permitted
    pub direct: bool,
    /// Encoded transfer airport sequences
    pub transfer_codes: Vec<String>,
}

impl PermittedRoute {
    /// Creates a route permitting only non-stop flights.
    pub fn direct(carrier: CarrierCode, origin: IataCode, destination: IataCode) -> Self {
        Self {
            carrier,
            origin,
            destination,
            direct: true,
            transfer_codes: Vec::new(),
        }
    }

    /// Creates a route with the given transfer codes.
    pub fn with_transfers<I, T>(
        carrier: CarrierCode,
        origin: IataCode,
        destination: IataCode,
        direct: bool,
        transfer_codes: I,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            carrier,
            origin,
            destination,
            direct,
            transfer_codes: transfer_codes.into_iter().map(Into::into).collect(),
        }
    }
}
