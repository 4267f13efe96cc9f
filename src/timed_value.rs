//! `TimedValue`: the record type re-expressing "metadata attached to instant
//! values" (§9 design note). The original carried a `tz` and `dateOnly` flag
//! as extra fields bolted onto a mutable date object; here they travel with
//! the instant as an ordinary, clonable struct field.
use chrono::{DateTime, Utc};

use crate::zone::ZoneDescriptor;

/// A point on the UTC timeline together with the zone metadata the engine
/// must carry through every clone (§3 invariant I5): the originating zone,
/// if any, and whether this value denotes a whole-day date rather than a
/// precise timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedValue {
    pub instant: DateTime<Utc>,
    pub zone: Option<ZoneDescriptor>,
    pub date_only: bool,
}

impl TimedValue {
    pub fn new(instant: DateTime<Utc>, zone: Option<ZoneDescriptor>, date_only: bool) -> Self {
        TimedValue {
            instant,
            zone,
            date_only,
        }
    }

    /// A precise, zoned timestamp.
    pub fn timed(instant: DateTime<Utc>, zone: ZoneDescriptor) -> Self {
        TimedValue::new(instant, Some(zone), false)
    }

    /// A whole-day date: `instant` must already be local midnight of the
    /// intended calendar date with no timezone shift applied (§3 I2).
    pub fn date_only(instant: DateTime<Utc>) -> Self {
        TimedValue::new(instant, None, true)
    }

    pub fn with_instant(&self, instant: DateTime<Utc>) -> Self {
        TimedValue::new(instant, self.zone.clone(), self.date_only)
    }
}

impl PartialOrd for TimedValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimedValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.instant.cmp(&other.instant)
    }
}
