//! The Wall-Time Converter: local wall-clock fields ↔ UTC instant, with
//! defined DST gap/fold disambiguation (§4.2).
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::diagnostics;
use crate::timed_value::TimedValue;
use crate::zone::ZoneDescriptor;

/// Local wall-clock calendar fields, the input to [`to_instant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTimeFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl WallTimeFields {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        WallTimeFields {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    fn to_naive(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?
            .and_hms_opt(self.hour, self.minute, self.second)
    }
}

/// Converts local wall-clock `fields` in `zone` to a UTC instant, carrying
/// the originating zone as metadata. Returns `None` only when `fields`
/// itself does not denote a valid calendar date/time (§7 `ParseFailure`
/// territory — callers that got `fields` from string parsing should treat
/// this the same way).
pub fn to_instant(fields: WallTimeFields, zone: &ZoneDescriptor) -> Option<TimedValue> {
    let naive = fields.to_naive()?;

    let instant_utc = match zone {
        ZoneDescriptor::Iana(name) => match name.parse::<Tz>() {
            Ok(tz) => resolve_local(tz, naive),
            Err(_) => {
                diagnostics::zone_validation_failed(name);
                naive
            }
        },
        ZoneDescriptor::FixedOffset(minutes) => {
            naive - Duration::minutes(i64::from(*minutes))
        }
        ZoneDescriptor::Unresolved(_) => naive,
    };

    Some(TimedValue::timed(
        DateTime::<Utc>::from_naive_utc_and_offset(instant_utc, Utc),
        zone.clone(),
    ))
}

/// Resolves a naive local datetime in `tz` to a naive UTC datetime,
/// disambiguating DST gaps (pick the instant right after the gap) and folds
/// (pick the second, post-transition occurrence).
fn resolve_local(tz: Tz, naive: NaiveDateTime) -> NaiveDateTime {
    match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt.naive_utc(),
        chrono::LocalResult::Ambiguous(_earliest, latest) => latest.naive_utc(),
        chrono::LocalResult::None => resolve_gap(tz, naive).naive_utc(),
    }
}

/// Resolves a naive local datetime that falls inside a DST gap by shifting
/// it forward by the gap's size and interpreting the result under the
/// post-transition offset — the "later" disambiguation: `02:30` in a
/// `02:00 -> 03:00` spring-forward gap becomes `03:30`, not the bare
/// transition boundary `03:00`.
fn resolve_gap(tz: Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    let probe_before = naive - Duration::hours(6);
    let probe_after = naive + Duration::hours(6);

    let before_utc = unambiguous_utc(tz, probe_before, false);
    let after_utc = unambiguous_utc(tz, probe_after, true);

    let elapsed_local = probe_after - probe_before;
    let elapsed_utc = after_utc.naive_utc() - before_utc.naive_utc();
    let gap = elapsed_local - elapsed_utc;

    unambiguous_utc(tz, naive + gap, true)
}

/// Converts a local datetime known to be unambiguous (or resolved by
/// picking the earlier/later candidate if it happens to fall in a fold) to
/// its UTC instant.
fn unambiguous_utc(tz: Tz, naive: NaiveDateTime, prefer_later: bool) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
        chrono::LocalResult::Ambiguous(earliest, latest) => {
            if prefer_later {
                latest.with_timezone(&Utc)
            } else {
                earliest.with_timezone(&Utc)
            }
        }
        chrono::LocalResult::None => {
            // probe landed in another gap six hours out; widen once more.
            unambiguous_utc(tz, naive + Duration::hours(6), prefer_later)
        }
    }
}

/// Formats `instant`'s wall-clock representation in `zone` as
/// `YYYYMMDDTHHmmss`, the anchor form the Rule Iterator expects.
pub fn format_for_rrule(instant: DateTime<Utc>, zone: &ZoneDescriptor) -> String {
    match zone {
        ZoneDescriptor::Iana(name) => match name.parse::<Tz>() {
            Ok(tz) => instant.with_timezone(&tz).format("%Y%m%dT%H%M%S").to_string(),
            Err(_) => instant.format("%Y%m%dT%H%M%S").to_string(),
        },
        ZoneDescriptor::FixedOffset(minutes) => {
            let shifted = instant + Duration::minutes(i64::from(*minutes));
            shifted.format("%Y%m%dT%H%M%S").to_string()
        }
        ZoneDescriptor::Unresolved(_) => instant.format("%Y%m%dT%H%M%S").to_string(),
    }
}

/// Parses a wall-time string in compact (`YYYYMMDDTHHmmss`, seconds
/// optional) or extended (`YYYY-MM-DDTHH:mm:ss`) form. Returns `None`
/// (§7 `ParseFailure`) if the string matches neither shape.
pub fn parse_wall_time_string(input: &str) -> Option<WallTimeFields> {
    let trimmed = input.trim().trim_end_matches('Z');

    if trimmed.contains('-') {
        // Extended form: YYYY-MM-DDTHH:mm:ss (seconds optional).
        let (date_part, time_part) = trimmed.split_once('T')?;
        let mut date_fields = date_part.split('-');
        let year: i32 = date_fields.next()?.parse().ok()?;
        let month: u32 = date_fields.next()?.parse().ok()?;
        let day: u32 = date_fields.next()?.parse().ok()?;

        let mut time_fields = time_part.split(':');
        let hour: u32 = time_fields.next()?.parse().ok()?;
        let minute: u32 = time_fields.next()?.parse().ok()?;
        let second: u32 = time_fields.next().map_or(Ok(0), |s| s.parse()).ok()?;

        return Some(WallTimeFields::new(year, month, day, hour, minute, second));
    }

    // Compact form: YYYYMMDDTHHmmss, seconds optional.
    let (date_part, time_part) = trimmed.split_once('T')?;
    if date_part.len() != 8 {
        return None;
    }
    if time_part.len() != 4 && time_part.len() != 6 {
        return None;
    }

    let year: i32 = date_part[0..4].parse().ok()?;
    let month: u32 = date_part[4..6].parse().ok()?;
    let day: u32 = date_part[6..8].parse().ok()?;
    let hour: u32 = time_part[0..2].parse().ok()?;
    let minute: u32 = time_part[2..4].parse().ok()?;
    let second: u32 = if time_part.len() == 6 {
        time_part[4..6].parse().ok()?
    } else {
        0
    };

    Some(WallTimeFields::new(year, month, day, hour, minute, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use chrono_tz::America::Los_Angeles;
    use chrono_tz::Europe::Berlin;

    #[test]
    fn converts_plain_iana_wall_time() {
        let fields = WallTimeFields::new(2025, 6, 1, 10, 0, 0);
        let tv = to_instant(fields, &ZoneDescriptor::Iana("Europe/Berlin".to_string())).unwrap();
        // Berlin is UTC+2 in June.
        assert_eq!(tv.instant, Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn converts_fixed_offset_wall_time() {
        let fields = WallTimeFields::new(2025, 1, 1, 9, 0, 0);
        let tv = to_instant(fields, &ZoneDescriptor::FixedOffset(330)).unwrap();
        assert_eq!(tv.instant, Utc.with_ymd_and_hms(2025, 1, 1, 3, 30, 0).unwrap());
    }

    #[test]
    fn dst_gap_resolves_to_instant_after_the_gap() {
        // US Eastern springs forward 2025-03-09 02:00 -> 03:00.
        let fields = WallTimeFields::new(2025, 3, 9, 2, 30, 0);
        let tv = to_instant(
            fields,
            &ZoneDescriptor::Iana("America/New_York".to_string()),
        )
        .unwrap();

        let local = tv.instant.with_timezone(&chrono_tz::America::New_York);
        assert_eq!(local.format("%H:%M:%S").to_string(), "03:30:00");
    }

    #[test]
    fn dst_fold_resolves_to_second_occurrence() {
        // US Eastern falls back 2025-11-02 02:00 EDT -> 01:00 EST, so 01:30
        // occurs twice; we want the later (EST, UTC-5) occurrence.
        let fields = WallTimeFields::new(2025, 11, 2, 1, 30, 0);
        let tv = to_instant(
            fields,
            &ZoneDescriptor::Iana("America/New_York".to_string()),
        )
        .unwrap();

        let expected_est = Utc.with_ymd_and_hms(2025, 11, 2, 6, 30, 0).unwrap();
        assert_eq!(tv.instant, expected_est);
    }

    #[test]
    fn format_for_rrule_round_trips_through_zone() {
        let instant = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let formatted = format_for_rrule(instant, &ZoneDescriptor::Iana("Europe/Berlin".to_string()));
        assert_eq!(formatted, "20250601T100000");
    }

    #[test]
    fn format_for_rrule_uses_fixed_offset() {
        let instant = Utc.with_ymd_and_hms(2025, 1, 1, 3, 30, 0).unwrap();
        let formatted = format_for_rrule(instant, &ZoneDescriptor::FixedOffset(330));
        assert_eq!(formatted, "20250101T090000");
    }

    #[test]
    fn parses_compact_form_with_and_without_seconds() {
        assert_eq!(
            parse_wall_time_string("20250601T100000"),
            Some(WallTimeFields::new(2025, 6, 1, 10, 0, 0))
        );
        assert_eq!(
            parse_wall_time_string("20250601T1000"),
            Some(WallTimeFields::new(2025, 6, 1, 10, 0, 0))
        );
    }

    #[test]
    fn parses_extended_form() {
        assert_eq!(
            parse_wall_time_string("2025-06-01T10:00:00"),
            Some(WallTimeFields::new(2025, 6, 1, 10, 0, 0))
        );
        assert_eq!(
            parse_wall_time_string("2025-06-01T10:00"),
            Some(WallTimeFields::new(2025, 6, 1, 10, 0, 0))
        );
    }

    #[test]
    fn rejects_malformed_wall_time_strings() {
        assert_eq!(parse_wall_time_string("not-a-date"), None);
        assert_eq!(parse_wall_time_string("2025060110:00:00"), None);
    }

    #[test]
    fn unresolved_zone_is_treated_as_utc() {
        let fields = WallTimeFields::new(2025, 1, 1, 12, 0, 0);
        let tv = to_instant(fields, &ZoneDescriptor::Unresolved("Bogus/Zone".to_string())).unwrap();
        assert_eq!(tv.instant, Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn sanity_check_los_angeles_and_berlin_are_distinct_offsets() {
        let fields = WallTimeFields::new(2025, 1, 15, 12, 0, 0);
        let la = to_instant(fields, &ZoneDescriptor::Iana("America/Los_Angeles".to_string())).unwrap();
        let be = to_instant(fields, &ZoneDescriptor::Iana("Europe/Berlin".to_string())).unwrap();
        assert_ne!(la.instant, be.instant);
        assert_eq!(la.instant.with_timezone(&Los_Angeles).hour(), 12);
        assert_eq!(be.instant.with_timezone(&Berlin).hour(), 12);
    }
}
