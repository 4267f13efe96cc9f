//! The Expansion Engine's output record: one concrete occurrence (§3).
use std::rc::Rc;

use crate::event::Event;
use crate::timed_value::TimedValue;

/// A single concrete occurrence produced by [`crate::expand::expand`].
/// Ordered by `start` only; callers that need a total order for ties rely
/// on the stable sort the engine performs, which preserves Rule Iterator
/// order (§4.5).
#[derive(Clone)]
pub struct Instance {
    pub start: TimedValue,
    pub end: TimedValue,
    pub summary: String,
    pub is_full_day: bool,
    pub is_recurring: bool,
    pub is_override: bool,
    pub event: Rc<Event>,
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
    }
}

impl Eq for Instance {}

impl PartialOrd for Instance {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instance {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start.cmp(&other.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DateType;
    use crate::zone::ZoneDescriptor;
    use chrono::{TimeZone, Utc};

    fn instance_at(event: &Rc<Event>, day: u32) -> Instance {
        let tv = TimedValue::timed(
            Utc.with_ymd_and_hms(2025, 1, day, 9, 0, 0).unwrap(),
            ZoneDescriptor::Iana("Etc/UTC".to_string()),
        );
        Instance {
            start: tv.clone(),
            end: tv,
            summary: event.summary.clone(),
            is_full_day: false,
            is_recurring: event.is_recurring(),
            is_override: false,
            event: Rc::clone(event),
        }
    }

    #[test]
    fn orders_instances_by_start_only() {
        let event = Rc::new(Event::new(
            "evt-1",
            "Standup",
            TimedValue::timed(
                Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
                ZoneDescriptor::Iana("Etc/UTC".to_string()),
            ),
            DateType::DateTime,
        ));

        let first = instance_at(&event, 1);
        let second = instance_at(&event, 2);
        assert!(first < second);

        let mut instances = vec![second.clone(), first.clone()];
        instances.sort();
        assert_eq!(instances[0].start, first.start);
        assert_eq!(instances[1].start, second.start);
    }
}
