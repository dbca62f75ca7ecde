//! Item ID Generation
//!
//! IDs are creation timestamps at millisecond resolution.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

/// Layout of a generated ID, e.g. `2015-06-01T09:30:00.125Z`
pub const ID_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Hands out strictly increasing creation times and their IDs.
///
/// Two items created within the same millisecond get distinct IDs: the later
/// one is pushed 1ms past the previous.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_millis: Mutex<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator whose IDs all sort after `last`, for stores that outlive
    /// the process.
    pub fn starting_after(last: DateTime<Utc>) -> Self {
        Self {
            last_millis: Mutex::new(last.timestamp_millis()),
        }
    }

    /// Creation time and ID for an item created at `now`
    pub fn next(&self, now: DateTime<Utc>) -> (DateTime<Utc>, String) {
        let mut last = self.last_millis.lock().unwrap_or_else(|e| e.into_inner());
        let millis = now.timestamp_millis().max(*last + 1);
        *last = millis;
        let created_at = DateTime::from_timestamp_millis(millis).unwrap_or(now);
        (created_at, created_at.format(ID_FORMAT).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_id_layout() {
        let ids = IdGenerator::new();
        let now = Utc.with_ymd_and_hms(2015, 6, 1, 9, 30, 0).unwrap();
        let (created_at, id) = ids.next(now);
        assert_eq!(created_at, now);
        assert_eq!(id, "2015-06-01T09:30:00.000Z");
    }

    #[test]
    fn test_same_millisecond_is_bumped() {
        let ids = IdGenerator::new();
        let now = Utc.with_ymd_and_hms(2015, 6, 1, 9, 30, 0).unwrap();
        let (_, first) = ids.next(now);
        let (second_at, second) = ids.next(now);
        assert_eq!(first, "2015-06-01T09:30:00.000Z");
        assert_eq!(second, "2015-06-01T09:30:00.001Z");
        assert!(second_at > now);
    }

    #[test]
    fn test_starting_after_skips_past_stored_ids() {
        let stored = Utc.with_ymd_and_hms(2015, 6, 1, 9, 30, 0).unwrap();
        let ids = IdGenerator::starting_after(stored);
        let (created_at, id) = ids.next(stored - chrono::Duration::hours(1));
        assert!(created_at > stored);
        assert_eq!(id, "2015-06-01T09:30:00.001Z");
    }

    #[test]
    fn test_clock_going_backwards_stays_increasing() {
        let ids = IdGenerator::new();
        let now = Utc.with_ymd_and_hms(2015, 6, 1, 9, 30, 0).unwrap();
        let (_, first) = ids.next(now);
        let (_, earlier) = ids.next(now - chrono::Duration::seconds(5));
        assert!(earlier > first);
    }
}
