use std::fmt;

/// The four error kinds of the engine's error handling design.
///
/// `InvalidArgument` and `RangeError` are raised to the caller of `expand`.
/// `UnresolvedZone` and `ParseFailure` are recovered locally by their
/// respective components (the zone resolver falls back to UTC, the wall-time
/// converter returns `None`) and are only ever seen here when a caller wants
/// to inspect *why* a fallback happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `from`/`to` is not a valid instant.
    InvalidArgument { message: String },
    /// `from > to`.
    RangeError { message: String },
    /// A TZID could not be mapped to an IANA zone or a fixed offset.
    UnresolvedZone { tzid: String },
    /// A wall-time string did not match any recognised textual form.
    ParseFailure { input: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EngineError::InvalidArgument { message } => {
                write!(f, "invalid argument: {message}")
            }
            EngineError::RangeError { message } => write!(f, "range error: {message}"),
            EngineError::UnresolvedZone { tzid } => {
                write!(f, "unresolved timezone: {tzid}")
            }
            EngineError::ParseFailure { input } => {
                write!(f, "could not parse wall-time string: {input}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

pub type EngineResult<T> = Result<T, EngineError>;
