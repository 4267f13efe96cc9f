//! Static Windows display-label → IANA zone mapping.
//!
//! Exchange and Outlook emit `TZID` parameters as either an IANA name, a raw
//! Windows timezone key (`"W. Europe Standard Time"`), or the "explicit"
//! territory-list label shown in the Windows Date & Time control panel
//! (`"(UTC+01:00) Amsterdam, Berlin, Bern, Rome, Stockholm, Vienna"`). This
//! table is sourced the same way the teacher's (unretrieved)
//! `chrono_windows_timezones` module documents itself as being sourced: the
//! Unicode CLDR `windowsZones.xml` supplemental data. It is a representative
//! subset, not the full CLDR table; extending it is a matter of appending
//! rows.
use std::collections::HashMap;

use lazy_static::lazy_static;

/// One Windows zone key with every IANA name CLDR lists for it, most
/// specific/preferred first. `resolve_windows_key` takes the first.
struct WindowsZoneEntry {
    key: &'static str,
    iana: &'static [&'static str],
}

// A representative subset of CLDR's windowsZones.xml. Each Windows key
// also appears under its "(UTC±HH:MM) City, City, ..." control-panel label,
// since Exchange calendars commonly emit that form instead of the key.
const WINDOWS_ZONES: &[WindowsZoneEntry] = &[
    WindowsZoneEntry { key: "UTC", iana: &["Etc/UTC"] },
    WindowsZoneEntry {
        key: "GMT Standard Time",
        iana: &["Europe/London"],
    },
    WindowsZoneEntry {
        key: "Dublin, Edinburgh, Lisbon, London",
        iana: &["Europe/London"],
    },
    WindowsZoneEntry {
        key: "W. Europe Standard Time",
        iana: &["Europe/Berlin"],
    },
    WindowsZoneEntry {
        key: "Amsterdam, Berlin, Bern, Rome, Stockholm, Vienna",
        iana: &["Europe/Berlin"],
    },
    WindowsZoneEntry {
        key: "Central Europe Standard Time",
        iana: &["Europe/Budapest"],
    },
    WindowsZoneEntry {
        key: "Belgrade, Bratislava, Budapest, Ljubljana, Prague",
        iana: &["Europe/Budapest"],
    },
    WindowsZoneEntry {
        key: "Romance Standard Time",
        iana: &["Europe/Paris"],
    },
    WindowsZoneEntry {
        key: "Brussels, Copenhagen, Madrid, Paris",
        iana: &["Europe/Paris"],
    },
    WindowsZoneEntry {
        key: "E. Europe Standard Time",
        iana: &["Europe/Chisinau"],
    },
    WindowsZoneEntry {
        key: "FLE Standard Time",
        iana: &["Europe/Helsinki"],
    },
    WindowsZoneEntry {
        key: "Helsinki, Kyiv, Riga, Sofia, Tallinn, Vilnius",
        iana: &["Europe/Helsinki"],
    },
    WindowsZoneEntry {
        key: "Russian Standard Time",
        iana: &["Europe/Moscow"],
    },
    WindowsZoneEntry {
        key: "Turkey Standard Time",
        iana: &["Europe/Istanbul"],
    },
    WindowsZoneEntry {
        key: "Eastern Standard Time",
        iana: &["America/New_York"],
    },
    WindowsZoneEntry {
        key: "Central Standard Time",
        iana: &["America/Chicago"],
    },
    WindowsZoneEntry {
        key: "Mountain Standard Time",
        iana: &["America/Denver"],
    },
    WindowsZoneEntry {
        key: "Pacific Standard Time",
        iana: &["America/Los_Angeles"],
    },
    WindowsZoneEntry {
        key: "Alaskan Standard Time",
        iana: &["America/Anchorage"],
    },
    WindowsZoneEntry {
        key: "Hawaiian Standard Time",
        iana: &["Pacific/Honolulu"],
    },
    WindowsZoneEntry {
        key: "Atlantic Standard Time",
        iana: &["America/Halifax"],
    },
    WindowsZoneEntry {
        key: "Newfoundland Standard Time",
        iana: &["America/St_Johns"],
    },
    WindowsZoneEntry {
        key: "SA Western Standard Time",
        iana: &["America/La_Paz"],
    },
    WindowsZoneEntry {
        key: "Georgetown, La Paz, Manaus, San Juan",
        iana: &["America/La_Paz"],
    },
    WindowsZoneEntry {
        key: "E. South America Standard Time",
        iana: &["America/Sao_Paulo"],
    },
    WindowsZoneEntry {
        key: "Argentina Standard Time",
        iana: &["America/Argentina/Buenos_Aires"],
    },
    WindowsZoneEntry {
        key: "Pacific SA Standard Time",
        iana: &["America/Santiago"],
    },
    WindowsZoneEntry {
        key: "Venezuela Standard Time",
        iana: &["America/Caracas"],
    },
    WindowsZoneEntry {
        key: "Egypt Standard Time",
        iana: &["Africa/Cairo"],
    },
    WindowsZoneEntry {
        key: "South Africa Standard Time",
        iana: &["Africa/Johannesburg"],
    },
    WindowsZoneEntry {
        key: "Israel Standard Time",
        iana: &["Asia/Jerusalem"],
    },
    WindowsZoneEntry {
        key: "Arabian Standard Time",
        iana: &["Asia/Dubai"],
    },
    WindowsZoneEntry {
        key: "Arab Standard Time",
        iana: &["Asia/Riyadh"],
    },
    WindowsZoneEntry {
        key: "West Asia Standard Time",
        iana: &["Asia/Tashkent"],
    },
    WindowsZoneEntry {
        key: "Central Asia Standard Time",
        iana: &["Asia/Almaty"],
    },
    WindowsZoneEntry {
        key: "N. Central Asia Standard Time",
        iana: &["Asia/Novosibirsk"],
    },
    WindowsZoneEntry {
        key: "India Standard Time",
        iana: &["Asia/Kolkata"],
    },
    WindowsZoneEntry {
        key: "China Standard Time",
        iana: &["Asia/Shanghai"],
    },
    WindowsZoneEntry {
        key: "Singapore Standard Time",
        iana: &["Asia/Singapore"],
    },
    WindowsZoneEntry {
        key: "Tokyo Standard Time",
        iana: &["Asia/Tokyo"],
    },
    WindowsZoneEntry {
        key: "Korea Standard Time",
        iana: &["Asia/Seoul"],
    },
    WindowsZoneEntry {
        key: "AUS Eastern Standard Time",
        iana: &["Australia/Sydney"],
    },
    WindowsZoneEntry {
        key: "W. Australia Standard Time",
        iana: &["Australia/Perth"],
    },
    WindowsZoneEntry {
        key: "New Zealand Standard Time",
        iana: &["Pacific/Auckland"],
    },
];

lazy_static! {
    /// Exact (case-sensitive) Windows key / explicit-label → canonical
    /// lookup, populated once at first use.
    static ref WINDOWS_EXACT: HashMap<&'static str, &'static [&'static str]> = {
        WINDOWS_ZONES
            .iter()
            .map(|entry| (entry.key, entry.iana))
            .collect()
    };

    /// Case-insensitive, whitespace-collapsed variant of `WINDOWS_EXACT`'s
    /// keys, built once. Used for §4.1 step 3(b).
    static ref WINDOWS_FOLDED: HashMap<String, &'static [&'static str]> = {
        WINDOWS_ZONES
            .iter()
            .map(|entry| (fold(entry.key), entry.iana))
            .collect()
    };

    /// Single city name (lower-cased) → IANA name, derived by splitting the
    /// composite "City, City, ..." keys above. Used for §4.1 step 3(d).
    static ref WINDOWS_CITY: HashMap<String, &'static str> = {
        let mut map = HashMap::new();
        for entry in WINDOWS_ZONES {
            if !entry.key.contains(',') {
                continue;
            }
            for city in entry.key.split(',') {
                let city = city.trim().to_lowercase();
                if !city.is_empty() {
                    map.entry(city).or_insert(entry.iana[0]);
                }
            }
        }
        map
    };
}

fn fold(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Strips a leading `(UTC...)` / `(GMT...)` parenthetical, if present,
/// returning the remainder trimmed of surrounding whitespace.
pub(crate) fn strip_utc_parenthetical(label: &str) -> &str {
    let trimmed = label.trim();
    if let Some(rest) = trimmed.strip_prefix('(') {
        if let Some(close) = rest.find(')') {
            return rest[close + 1..].trim();
        }
    }
    trimmed
}

/// Resolves a Windows TZID/label to an IANA zone name following the ordered
/// match rules of spec §4.1 step 3: exact key, folded key, parenthetical
/// stripped, then per-segment of the stripped label.
pub(crate) fn resolve_windows_label(label: &str) -> Option<&'static str> {
    if let Some(iana) = WINDOWS_EXACT.get(label) {
        return Some(iana[0]);
    }

    let folded = fold(label);
    if let Some(iana) = WINDOWS_FOLDED.get(&folded) {
        return Some(iana[0]);
    }

    let stripped = strip_utc_parenthetical(label);
    if let Some(iana) = WINDOWS_EXACT.get(stripped) {
        return Some(iana[0]);
    }
    let stripped_folded = fold(stripped);
    if let Some(iana) = WINDOWS_FOLDED.get(&stripped_folded) {
        return Some(iana[0]);
    }

    for segment in stripped.split(',') {
        let segment = segment.trim().to_lowercase();
        if segment.is_empty() {
            continue;
        }
        if let Some(iana) = WINDOWS_CITY.get(&segment) {
            return Some(iana);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_exact_windows_key() {
        assert_eq!(
            resolve_windows_label("W. Europe Standard Time"),
            Some("Europe/Berlin")
        );
    }

    #[test]
    fn resolves_case_insensitive_whitespace_collapsed_key() {
        assert_eq!(
            resolve_windows_label("w.   europe standard time"),
            Some("Europe/Berlin")
        );
    }

    #[test]
    fn resolves_explicit_city_list_label_directly() {
        assert_eq!(
            resolve_windows_label("(UTC+01:00) Amsterdam, Berlin, Bern, Rome, Stockholm, Vienna"),
            Some("Europe/Berlin")
        );
    }

    #[test]
    fn resolves_via_single_city_segment_fallback() {
        // Not a known composite key verbatim, but "Berlin" is a known segment.
        assert_eq!(
            resolve_windows_label("(UTC+01:00) Berlin, Somewhere Else"),
            Some("Europe/Berlin")
        );
    }

    #[test]
    fn returns_none_for_unknown_label() {
        assert_eq!(resolve_windows_label("Bogus Standard Time"), None);
    }

    #[test]
    fn strip_utc_parenthetical_removes_leading_group() {
        assert_eq!(
            strip_utc_parenthetical("(UTC+00:00) Dublin, Edinburgh, Lisbon, London"),
            "Dublin, Edinburgh, Lisbon, London"
        );
        assert_eq!(strip_utc_parenthetical("W. Europe Standard Time"), "W. Europe Standard Time");
    }
}
