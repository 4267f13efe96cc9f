//! Calendar recurrence expansion engine.
//!
//! Given an already-parsed [`Event`] (an iCalendar VEVENT plus its EXDATEs
//! and RECURRENCE-ID overrides) and a caller-supplied window, [`expand`]
//! produces the concrete, chronologically ordered occurrences that fall
//! inside it. Parsing ICS text, ingesting it over HTTP or from a file, and
//! presenting results are all out of scope here; callers hand this crate an
//! already-structured `Event`.
pub mod date_key;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod expand;
pub mod instance;
pub mod rrule_source;
pub mod timed_value;
pub mod wall_time;
pub mod windows_zones;
pub mod zone;

pub use error::{EngineError, EngineResult};
pub use event::{DateType, Event};
pub use expand::{expand, ExpandOptions, ExpandRequest};
pub use instance::Instance;
pub use rrule_source::{RRuleSetSource, RecurrenceRule};
pub use timed_value::TimedValue;
pub use wall_time::{format_for_rrule, parse_wall_time_string, to_instant, WallTimeFields};
pub use zone::{register_alias, resolve, resolve_many, ZoneDescriptor};
