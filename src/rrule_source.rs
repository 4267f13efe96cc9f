//! The Recurrence Rule Iterator contract (§4.4): opaque to the Expansion
//! Engine beyond a single `between(from, to)` method. Grounded on the
//! `RecurrenceManager` collaborator boundary used to wrap the `rrule` crate
//! for expansion elsewhere in the pack.
use chrono::{DateTime, Utc};
use rrule::{RRuleError, RRuleSet};

use crate::timed_value::TimedValue;
use crate::zone::ZoneDescriptor;

/// A source of recurrence instants, opaque to the Expansion Engine. The
/// engine only ever asks for candidates inside `[from, to]`; it has no
/// knowledge of RRULE syntax, frequency, or expansion limits.
pub trait RecurrenceRule {
    fn between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<TimedValue>;
}

/// An `rrule`-crate-backed [`RecurrenceRule`], the concrete adapter used for
/// real events. `zone` is attached to every produced candidate so downstream
/// date-keying and formatting can use the event's own zone rather than UTC.
pub struct RRuleSetSource {
    set: RRuleSet,
    zone: ZoneDescriptor,
}

impl RRuleSetSource {
    pub fn new(set: RRuleSet, zone: ZoneDescriptor) -> Self {
        RRuleSetSource { set, zone }
    }

    /// Builds a source from a raw `RRULE:`/`EXRULE:`/`RDATE:` block plus a
    /// `DTSTART`, in the textual form `rrule` itself parses.
    pub fn parse(ical_block: &str, zone: ZoneDescriptor) -> Result<Self, RRuleError> {
        let set: RRuleSet = ical_block.parse()?;
        Ok(RRuleSetSource::new(set, zone))
    }
}

impl RecurrenceRule for RRuleSetSource {
    fn between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<TimedValue> {
        let from_tz = from.with_timezone(&rrule::Tz::UTC);
        let to_tz = to.with_timezone(&rrule::Tz::UTC);

        let result = self
            .set
            .clone()
            .after(from_tz)
            .before(to_tz)
            .all(u16::MAX);

        result
            .dates
            .into_iter()
            .map(|dt| TimedValue::timed(dt.with_timezone(&Utc), self.zone.clone()))
            .collect()
    }
}
