//! The Zone Resolver: maps heterogeneous `TZID` strings (IANA names, Windows
//! display labels, fixed-offset labels) to a canonical [`ZoneDescriptor`].
use std::collections::HashMap;
use std::sync::RwLock;

use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;

use crate::diagnostics;
use crate::windows_zones::resolve_windows_label;

/// A resolved timezone, tagged by how it was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneDescriptor {
    /// A canonical IANA zone name, e.g. `"Europe/Berlin"`.
    Iana(String),
    /// A fixed offset from UTC, in minutes (east positive).
    FixedOffset(i32),
    /// The TZID could not be resolved to either of the above. Retained
    /// verbatim for diagnostics; callers must treat this as UTC.
    Unresolved(String),
}

impl ZoneDescriptor {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, ZoneDescriptor::Unresolved(_))
    }

    /// Normalized textual form suitable for round-tripping through a wire
    /// format: the IANA name, or an `±HH:MM` label for fixed offsets.
    pub fn normalized_label(&self) -> String {
        match self {
            ZoneDescriptor::Iana(name) => name.clone(),
            ZoneDescriptor::FixedOffset(minutes) => format_offset_label(*minutes),
            ZoneDescriptor::Unresolved(original) => original.clone(),
        }
    }

    /// The IANA zone for `Etc/GMT±N` style fixed offsets, when the offset is
    /// a whole number of hours. Note CLDR's inverted sign convention: a
    /// *positive* UTC offset maps to `Etc/GMT-N`.
    pub fn as_whole_hour_etc_gmt(&self) -> Option<String> {
        match self {
            ZoneDescriptor::FixedOffset(minutes) if minutes % 60 == 0 => {
                let hours = minutes / 60;
                if hours == 0 {
                    Some("Etc/GMT".to_string())
                } else {
                    Some(format!("Etc/GMT{}{}", if hours > 0 { "-" } else { "+" }, hours.abs()))
                }
            }
            _ => None,
        }
    }
}

fn format_offset_label(minutes: i32) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let minutes = minutes.abs();
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

lazy_static! {
    /// Memoized "is this an IANA zone the platform's database knows about"
    /// cache, guarded for concurrent readers per §5. Entries never
    /// invalidate within a process lifetime.
    static ref IANA_VALIDITY_CACHE: RwLock<HashMap<String, bool>> = RwLock::new(HashMap::new());

    /// Alias table so tests and consumers can equate zones, e.g.
    /// `Etc/Unknown` is treated the same as `Etc/GMT`. Written only at
    /// configuration time; concurrent reads are safe.
    static ref ALIASES: RwLock<HashMap<String, String>> = {
        let mut map = HashMap::new();
        map.insert("Etc/Unknown".to_string(), "Etc/GMT".to_string());
        map.insert("GMT".to_string(), "Etc/GMT".to_string());
        RwLock::new(map)
    };

    static ref OFFSET_LABEL_RE: Regex =
        Regex::new(r"(?i)^\(?\s*(?:UTC|GMT)?\s*([+-])\s*(\d{1,2})(?::?(\d{2}))?\s*\)?$").unwrap();
}

/// Registers an additional zone alias at configuration time. Intended to be
/// called once during engine setup, before any `resolve` calls run
/// concurrently.
pub fn register_alias(from: impl Into<String>, to: impl Into<String>) {
    ALIASES.write().unwrap().insert(from.into(), to.into());
}

fn resolve_alias(name: &str) -> String {
    ALIASES
        .read()
        .unwrap()
        .get(name)
        .cloned()
        .unwrap_or_else(|| name.to_string())
}

fn is_valid_iana(name: &str) -> bool {
    if let Some(&cached) = IANA_VALIDITY_CACHE.read().unwrap().get(name) {
        return cached;
    }
    let valid = name.parse::<Tz>().is_ok();
    IANA_VALIDITY_CACHE
        .write()
        .unwrap()
        .insert(name.to_string(), valid);
    valid
}

/// Parses a fixed-offset label of the form `±H`, `±HH`, `±HH:MM`, `±HHMM`,
/// with an optional leading `UTC`/`GMT` and optional surrounding
/// parentheses. Returns minutes east of UTC.
fn parse_fixed_offset(value: &str) -> Option<i32> {
    let caps = OFFSET_LABEL_RE.captures(value.trim())?;
    let sign = if &caps[1] == "-" { -1 } else { 1 };
    let hours: i32 = caps[2].parse().ok()?;
    let minutes: i32 = caps.get(3).map_or(Ok(0), |m| m.as_str().parse()).ok()?;

    if hours > 14 || (hours == 14 && minutes != 0) || minutes >= 60 {
        return None;
    }

    Some(sign * (hours * 60 + minutes))
}

fn host_local_zone() -> ZoneDescriptor {
    match iana_time_zone::get_timezone() {
        Ok(tz) if tz.parse::<Tz>().is_ok() => ZoneDescriptor::Iana(tz),
        _ => ZoneDescriptor::FixedOffset(0),
    }
}

/// Resolves a `TZID` string as it may occur in an ical event to a canonical
/// [`ZoneDescriptor`]. Total function; never panics.
pub fn resolve(tzid: &str) -> ZoneDescriptor {
    if tzid == "tzone://Microsoft/Custom"
        || tzid.starts_with("Customized Time Zone")
        || tzid.starts_with("tzone://Microsoft/")
    {
        return host_local_zone();
    }

    let value = tzid.trim_matches('"');

    if value.contains(char::is_whitespace) || value.contains(',') {
        if let Some(iana) = resolve_windows_label(value) {
            return ZoneDescriptor::Iana(iana.to_string());
        }
    }

    if value.starts_with('(') {
        if let Some(close) = value.find(')') {
            let inner = &value[1..close];
            if let Some(minutes) = parse_fixed_offset(inner) {
                return ZoneDescriptor::FixedOffset(minutes);
            }
        }
    }

    if let Some(minutes) = parse_fixed_offset(value) {
        return ZoneDescriptor::FixedOffset(minutes);
    }

    let candidate = resolve_alias(value);
    if is_valid_iana(&candidate) {
        return ZoneDescriptor::Iana(candidate);
    }

    diagnostics::tzid_unresolved(tzid);
    ZoneDescriptor::Unresolved(tzid.to_string())
}

/// Resolves every TZID in `tzids` in one pass, useful for resolving an
/// event's own `tz` plus every EXDATE/override `tz` up front.
pub fn resolve_many<'a, I: IntoIterator<Item = &'a str>>(
    tzids: I,
) -> HashMap<String, ZoneDescriptor> {
    tzids
        .into_iter()
        .map(|tzid| (tzid.to_string(), resolve(tzid)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_iana_name() {
        assert_eq!(
            resolve("Europe/Berlin"),
            ZoneDescriptor::Iana("Europe/Berlin".to_string())
        );
    }

    #[test]
    fn resolves_windows_display_label() {
        assert_eq!(
            resolve("W. Europe Standard Time"),
            ZoneDescriptor::Iana("Europe/Berlin".to_string())
        );
    }

    #[test]
    fn resolves_explicit_city_list_label() {
        assert_eq!(
            resolve("(UTC+01:00) Amsterdam, Berlin, Bern, Rome, Stockholm, Vienna"),
            ZoneDescriptor::Iana("Europe/Berlin".to_string())
        );
    }

    #[test]
    fn resolves_plain_offset_forms() {
        assert_eq!(resolve("+1"), ZoneDescriptor::FixedOffset(60));
        assert_eq!(resolve("-05"), ZoneDescriptor::FixedOffset(-300));
        assert_eq!(resolve("+05:30"), ZoneDescriptor::FixedOffset(330));
        assert_eq!(resolve("-0530"), ZoneDescriptor::FixedOffset(-330));
        assert_eq!(resolve("UTC+2"), ZoneDescriptor::FixedOffset(120));
        assert_eq!(resolve("(GMT-08:00)"), ZoneDescriptor::FixedOffset(-480));
    }

    #[test]
    fn rejects_out_of_range_offsets() {
        assert!(matches!(resolve("+15:00"), ZoneDescriptor::Unresolved(_)));
        assert!(matches!(resolve("+14:30"), ZoneDescriptor::Unresolved(_)));
        assert!(matches!(resolve("+05:60"), ZoneDescriptor::Unresolved(_)));
    }

    #[test]
    fn falls_back_to_unresolved_and_retains_original() {
        assert_eq!(
            resolve("Bogus/Nonexistent"),
            ZoneDescriptor::Unresolved("Bogus/Nonexistent".to_string())
        );
    }

    #[test]
    fn alias_table_equates_zones() {
        assert_eq!(
            resolve("Etc/Unknown"),
            ZoneDescriptor::Iana("Etc/GMT".to_string())
        );
    }

    #[test]
    fn whole_hour_offset_derives_etc_gmt_with_inverted_sign() {
        assert_eq!(
            ZoneDescriptor::FixedOffset(120).as_whole_hour_etc_gmt(),
            Some("Etc/GMT-2".to_string())
        );
        assert_eq!(
            ZoneDescriptor::FixedOffset(-300).as_whole_hour_etc_gmt(),
            Some("Etc/GMT+5".to_string())
        );
        assert_eq!(ZoneDescriptor::FixedOffset(90).as_whole_hour_etc_gmt(), None);
    }

    #[test]
    fn resolve_many_resolves_every_tzid() {
        let resolved = resolve_many(vec!["Europe/Berlin", "Bogus/Nope"]);
        assert_eq!(resolved.len(), 2);
        assert!(resolved["Europe/Berlin"].is_resolved());
        assert!(!resolved["Bogus/Nope"].is_resolved());
    }
}
