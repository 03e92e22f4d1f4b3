//! Airline (carrier) code type.

use std::fmt;

/// Error returned when parsing an invalid carrier code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid carrier code: {reason}")]
pub struct InvalidCarrier {
    reason: &'static str,
}

/// A valid airline designator.
///
/// Carrier codes are 2-character IATA designators (e.g., "S7", "SU", "U6")
/// or 3-letter ICAO designators. They consist of uppercase ASCII letters and
/// digits.
///
/// # Examples
///
/// ```
/// use flight_search::domain::CarrierCode;
///
/// let s7 = CarrierCode::parse("S7").unwrap();
/// assert_eq!(s7.as_str(), "S7");
///
/// assert!(CarrierCode::parse("s7").is_err());
/// assert!(CarrierCode::parse("S").is_err());
/// assert!(CarrierCode::parse("SIBR").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarrierCode {
    bytes: [u8; 3],
    len: u8,
}

impl CarrierCode {
    /// Parse a carrier code from a string.
    ///
    /// The input must be 2 or 3 uppercase ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidCarrier> {
        let bytes = s.as_bytes();

        if !(2..=3).contains(&bytes.len()) {
            return Err(InvalidCarrier {
                reason: "must be 2 or 3 characters",
            });
        }

        for &b in bytes {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidCarrier {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
        }

        let mut stored = [0u8; 3];
        stored[..bytes.len()].copy_from_slice(bytes);

        Ok(CarrierCode {
            bytes: stored,
            len: bytes.len() as u8,
        })
    }

    /// Parse a carrier code, trimming whitespace and upper-casing first.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidCarrier> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the carrier code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII letters and digits
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap()
    }
}

impl fmt::Debug for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CarrierCode({})", self.as_str())
    }
}

impl fmt::Display for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
