//! Thin wrappers over the `log` crate for the engine's two named,
//! locally-recovered diagnostics (§7): an unresolved TZID, and a zone
//! descriptor that validates at resolve time but turns out unusable at
//! conversion time. Both fall back to UTC at the call site; these only emit
//! the warning.
use log::warn;

pub fn tzid_unresolved(tzid: &str) {
    warn!(tzid = tzid; "TZID unresolved, falling back to UTC");
}

pub fn zone_validation_failed(tzid: &str) {
    warn!(tzid = tzid; "zone validation failed, falling back to UTC");
}
