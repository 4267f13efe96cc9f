//! The Expansion Engine (§4.5): the component every other module exists to
//! serve. Turns an [`Event`] plus a request window into concrete,
//! chronologically ordered [`Instance`]s.
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

use crate::date_key;
use crate::error::{EngineError, EngineResult};
use crate::event::{DateType, Event};
use crate::instance::Instance;
use crate::timed_value::TimedValue;

/// Toggles for the three behaviors the Expansion Engine can vary (§4.5).
/// All default to the spec's stated defaults.
#[derive(Debug, Clone, Copy)]
pub struct ExpandOptions {
    pub exclude_exdates: bool,
    pub include_overrides: bool,
    pub expand_ongoing: bool,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        ExpandOptions {
            exclude_exdates: true,
            include_overrides: true,
            expand_ongoing: false,
        }
    }
}

/// The caller-supplied expansion window. `from`/`to` are plain UTC instants;
/// being typed as `DateTime<Utc>` already rules out the "not an instant"
/// failure §4.5 names as `InvalidArgument` — only `from > to` remains to be
/// checked at runtime.
pub struct ExpandRequest {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub options: ExpandOptions,
}

impl ExpandRequest {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        ExpandRequest {
            from,
            to,
            options: ExpandOptions::default(),
        }
    }
}

/// Expands `event` into concrete occurrences within `request`'s window.
pub fn expand(event: &Rc<Event>, request: &ExpandRequest) -> EngineResult<Vec<Instance>> {
    if request.from > request.to {
        return Err(EngineError::RangeError {
            message: format!(
                "expansion window is inverted: from ({}) is after to ({})",
                request.from, request.to
            ),
        });
    }

    let base_duration = effective_duration(event);

    let candidates = match &event.rrule {
        Some(rule) => {
            let widen = base_duration.unwrap_or_else(Duration::zero);
            rule.between(request.from - widen, request.to)
        }
        None => vec![event.start.clone()],
    };

    let mut instances = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let key = date_key::key_of(&candidate);

        if request.options.exclude_exdates && is_excluded(event, &candidate, &key) {
            continue;
        }

        let (start, end, summary, is_override) = if request.options.include_overrides {
            if let Some(over) = event.recurrences.get(&key) {
                (
                    over.start.clone(),
                    compute_override_end(over, base_duration),
                    over.summary.clone(),
                    true,
                )
            } else {
                (
                    candidate.clone(),
                    compute_base_end(&candidate, base_duration),
                    event.summary.clone(),
                    false,
                )
            }
        } else {
            (
                candidate.clone(),
                compute_base_end(&candidate, base_duration),
                event.summary.clone(),
                false,
            )
        };

        if !in_window(&start, &end, request) {
            continue;
        }

        instances.push(Instance {
            is_full_day: start.date_only,
            is_recurring: event.is_recurring(),
            is_override,
            start,
            end,
            summary,
            event: Rc::clone(event),
        });
    }

    instances.sort();
    Ok(instances)
}

fn is_excluded(event: &Event, candidate: &TimedValue, key: &str) -> bool {
    if event.exdate.contains(key) {
        return true;
    }
    event.exdate.iter().any(|entry| date_key::matches_key(candidate, entry))
}

fn in_window(start: &TimedValue, end: &TimedValue, request: &ExpandRequest) -> bool {
    if request.options.expand_ongoing {
        start.instant <= request.to && end.instant >= request.from
    } else {
        start.instant >= request.from && start.instant <= request.to
    }
}

/// The event's own span, used both to widen the candidate-generation
/// interval backward and as the fallback when computing an occurrence's
/// end (§4.5 end-computation priority: explicit duration, then derived from
/// `end`, then a whole day for date-only events).
fn effective_duration(event: &Event) -> Option<Duration> {
    if let Some(duration) = event.duration {
        return Some(duration);
    }
    if let Some(end) = &event.end {
        return Some(end.instant - event.start.instant);
    }
    if event.date_type == DateType::Date {
        return Some(Duration::hours(24));
    }
    None
}

fn compute_base_end(candidate: &TimedValue, duration: Option<Duration>) -> TimedValue {
    match duration {
        Some(d) => candidate.with_instant(candidate.instant + d),
        None => candidate.clone(),
    }
}

/// Resolved Open Question 1: an override with no end of its own inherits
/// the base event's effective duration, applied to the override's own
/// (possibly moved) start. See DESIGN.md.
fn compute_override_end(over: &Event, base_duration: Option<Duration>) -> TimedValue {
    if let Some(end) = &over.end {
        return end.clone();
    }
    if let Some(d) = over.duration.or(base_duration) {
        return over.start.with_instant(over.start.instant + d);
    }
    over.start.clone()
}
