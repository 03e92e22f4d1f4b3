//! Inclusive time windows.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// An inclusive `[start, end]` range of UTC instants.
///
/// Used both for the requested departure window and for the wider window
/// the segment loader queries.
///
/// # Examples
///
/// ```
/// use flight_search::domain::TimeWindow;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let to = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// let window = TimeWindow::from_dates(from, to);
///
/// assert!(window.contains(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
/// assert!(window.contains(Utc.with_ymd_and_hms(2024, 1, 2, 23, 59, 59).unwrap()));
/// assert!(!window.contains(Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window from two instants. Both bounds are inclusive.
    ///
    /// A window whose end precedes its start is empty: it contains nothing.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The window covering whole calendar days, from the start of `from`
    /// to the last microsecond of `to`.
    pub fn from_dates(from: NaiveDate, to: NaiveDate) -> Self {
        let start = from.and_time(NaiveTime::MIN).and_utc();
        let end = to
            .succ_opt()
            .map(|next| next.and_time(NaiveTime::MIN).and_utc() - Duration::microseconds(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { start, end }
    }

    /// Returns the first instant in the window.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the last instant in the window.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns true if `instant` lies within the window, bounds included.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Returns a window with the same start and the end pushed back by `by`.
    ///
    /// Saturates at the latest representable instant.
    pub fn extend_end(&self, by: Duration) -> Self {
        Self {
            start: self.start,
            end: self
                .end
                .checked_add_signed(by)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Returns true if the window contains no instants.
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}
