//! Recorded moments on the plan and its log entries.

use std::fmt;

use jiff::{civil::DateTime, tz::TimeZone, Timestamp};
use serde::Serialize;

/// When something happened.
///
/// The planner always records exact UTC instants. Documents may be edited by
/// hand, so a value that is not an ISO 8601 date-time is kept as written
/// instead of being replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Stamp {
    /// An exact instant, rendered as RFC 3339 in UTC
    At(Timestamp),

    /// Hand-written text that does not parse as a date-time
    Verbatim(String),
}

impl Stamp {
    /// Reads a stored value.
    ///
    /// RFC 3339 instants are taken as is. ISO 8601 date-times without an
    /// offset are read as UTC. Anything else is kept verbatim.
    pub fn parse(raw: &str) -> Self {
        if let Ok(ts) = raw.parse::<Timestamp>() {
            return Self::At(ts);
        }
        match raw
            .parse::<DateTime>()
            .and_then(|civil| civil.to_zoned(TimeZone::UTC))
        {
            Ok(zoned) => Self::At(zoned.timestamp()),
            Err(_) => Self::Verbatim(raw.to_string()),
        }
    }

    /// The instant, when the value parsed as one.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Stamp::At(ts) => Some(*ts),
            Stamp::Verbatim(_) => None,
        }
    }
}

impl From<Timestamp> for Stamp {
    fn from(ts: Timestamp) -> Self {
        Stamp::At(ts)
    }
}

impl PartialEq<Timestamp> for Stamp {
    fn eq(&self, other: &Timestamp) -> bool {
        self.as_timestamp().as_ref() == Some(other)
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stamp::At(ts) => write!(f, "{ts}"),
            Stamp::Verbatim(text) => f.write_str(text),
        }
    }
}
