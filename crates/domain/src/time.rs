//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// UTC timestamp used for snapshot capture times and log records.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return the current UTC calendar date.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Fixed-width RFC 3339 rendering (microseconds, `Z` suffix).
///
/// Stored timestamps sort lexically in chronological order.
#[must_use]
pub fn to_fixed_rfc3339(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
