//! Search configuration for the itinerary planner.

use chrono::Duration;

/// Connection-time policy and loader look-ahead.
///
/// These are carrier-wide policy values; requests cannot override them.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Minimum ground time at a transfer airport (minutes).
    /// Connections tighter than this are rejected.
    pub min_connection_mins: i64,

    /// Maximum ground time at a transfer airport (minutes).
    /// Longer layovers are rejected.
    pub max_connection_mins: i64,

    /// How far past the end of the requested departure window the segment
    /// loader fetches (hours), so that onward legs of itineraries starting
    /// late in the window are available.
    pub lookahead_hours: i64,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(min_connection_mins: i64, max_connection_mins: i64, lookahead_hours: i64) -> Self {
        Self {
            min_connection_mins,
            max_connection_mins,
            lookahead_hours,
        }
    }

    /// Returns the minimum connection time as a Duration.
    pub fn min_connection(&self) -> Duration {
        Duration::minutes(self.min_connection_mins)
    }

    /// Returns the maximum connection time as a Duration.
    pub fn max_connection(&self) -> Duration {
        Duration::minutes(self.max_connection_mins)
    }

    /// Returns the loader look-ahead as a Duration.
    pub fn lookahead(&self) -> Duration {
        Duration::hours(self.lookahead_hours)
    }

    /// Returns true if `connection` lies within the permitted range,
    /// bounds included.
    pub fn accepts_connection(&self, connection: Duration) -> bool {
        self.min_connection() <= connection && connection <= self.max_connection()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_connection_mins: 480,  // 8 hours
            max_connection_mins: 2880, // 48 hours
            lookahead_hours: 48,
        }
    }
}
