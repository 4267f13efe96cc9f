//! The Event data model (§3): a heterogeneous record of optional fields,
//! re-expressed as a struct with `Option` members per the §9 design note
//! rather than a duck-typed object.
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use chrono::Duration;

use crate::error::{EngineError, EngineResult};
use crate::rrule_source::RecurrenceRule;
use crate::timed_value::TimedValue;

/// Whether an event's start/end denote a whole calendar day (`VALUE=DATE`)
/// or a precise timestamp (`VALUE=DATE-TIME`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateType {
    Date,
    DateTime,
}

/// A parsed calendar event, the Expansion Engine's sole input alongside a
/// request window. `rrule` is an opaque collaborator (§4.4); the engine
/// never inspects its internals.
///
/// A RECURRENCE-ID override is the same shape, minus `rrule`: it is an
/// `Event` whose `rrule` is always `None` by construction (enforced by
/// `validate`), used verbatim in place of the base occurrence's computed
/// values (§4.5, §3 invariant I3 — replaces, never duplicates).
pub struct Event {
    pub uid: String,
    pub summary: String,
    pub start: TimedValue,
    pub end: Option<TimedValue>,
    pub duration: Option<Duration>,
    pub date_type: DateType,
    pub rrule: Option<Rc<dyn RecurrenceRule>>,
    /// Date keys (§4.3) of excluded occurrences.
    pub exdate: HashSet<String>,
    /// Date key → override, for occurrences that were moved or modified.
    pub recurrences: HashMap<String, Event>,
}

impl Event {
    pub fn new(uid: impl Into<String>, summary: impl Into<String>, start: TimedValue, date_type: DateType) -> Self {
        Event {
            uid: uid.into(),
            summary: summary.into(),
            start,
            end: None,
            duration: None,
            date_type,
            rrule: None,
            exdate: HashSet::new(),
            recurrences: HashMap::new(),
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.rrule.is_some()
    }

    /// Structural validation run once up front, the way a recurrence
    /// manager validates its inputs before expansion rather than failing
    /// deep inside candidate generation. Not called implicitly by `expand`;
    /// callers that want it run it themselves.
    pub fn validate(&self) -> EngineResult<()> {
        if self.uid.trim().is_empty() {
            return Err(EngineError::InvalidArgument {
                message: "event uid must not be empty".to_string(),
            });
        }

        if let Some(end) = &self.end {
            if end.instant < self.start.instant {
                return Err(EngineError::InvalidArgument {
                    message: format!(
                        "event {} has end ({}) before start ({})",
                        self.uid, end.instant, self.start.instant
                    ),
                });
            }
        }

        if let Some(duration) = self.duration {
            if duration < Duration::zero() {
                return Err(EngineError::InvalidArgument {
                    message: format!("event {} has a negative duration", self.uid),
                });
            }
        }

        for (key, overridden) in &self.recurrences {
            if overridden.rrule.is_some() {
                return Err(EngineError::InvalidArgument {
                    message: format!(
                        "override {} on event {} must not carry its own rrule",
                        key, self.uid
                    ),
                });
            }

            if let Some(end) = &overridden.end {
                if end.instant < overridden.start.instant {
                    return Err(EngineError::InvalidArgument {
                        message: format!(
                            "override {} on event {} has end before start",
                            key, self.uid
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}
