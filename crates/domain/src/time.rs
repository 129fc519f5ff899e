//! Time and timestamp helpers.

use chrono::{DateTime, TimeDelta, Utc};

/// UTC timestamp used for `created_at` and `updated_at`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return a mutation timestamp strictly later than `previous`.
///
/// Falls back to `previous` plus one microsecond when the clock has not
/// advanced (coarse clocks, or two mutations in the same tick).
#[must_use]
pub fn after(previous: Timestamp, current: Timestamp) -> Timestamp {
    if current > previous {
        current
    } else {
        previous + TimeDelta::microseconds(1)
    }
}
