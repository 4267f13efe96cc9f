//! The Date-Key Encoder: derives the canonical `"YYYY-MM-DD"` key used to
//! match EXDATE entries and RECURRENCE-ID overrides against candidate
//! occurrences (§4.3).
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::timed_value::TimedValue;
use crate::zone::ZoneDescriptor;

/// Derives the date key for `value`, following the priority order of §4.3:
/// a whole-day value uses its own UTC calendar fields directly (§3 I2: a
/// date-only instant is already local midnight with no shift to undo);
/// otherwise a resolved zone's calendar is used; otherwise UTC.
pub fn key_of(value: &TimedValue) -> String {
    if value.date_only {
        return format_date(value.instant);
    }

    match &value.zone {
        Some(ZoneDescriptor::Iana(name)) => match name.parse::<Tz>() {
            Ok(tz) => format_date(value.instant.with_timezone(&tz).naive_local().and_utc()),
            Err(_) => format_date(value.instant),
        },
        Some(ZoneDescriptor::FixedOffset(minutes)) => {
            let shifted = value.instant + chrono::Duration::minutes(i64::from(*minutes));
            format_date(shifted)
        }
        Some(ZoneDescriptor::Unresolved(_)) | None => format_date(value.instant),
    }
}

fn format_date(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// Whether `candidate` matches `entry`'s key, either by derived date key or
/// by the full ISO-8601 UTC timestamp (§4.3 dual-key lookup, used for
/// EXDATE/RECURRENCE-ID matching against timed occurrences).
pub fn matches_key(candidate: &TimedValue, entry_key: &str) -> bool {
    key_of(candidate) == entry_key || candidate.instant.to_rfc3339() == entry_key
}
