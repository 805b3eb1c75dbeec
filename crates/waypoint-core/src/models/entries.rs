//! Append-only log entries: progress notes and reflections.

use serde::Serialize;

use super::Stamp;

/// A timestamped progress note with an optional completion percentage.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProgressEntry {
    /// When the entry was recorded (UTC)
    pub timestamp: Stamp,

    /// Free-text note, never empty
    pub message: String,

    /// Percentage reported with the note, if any
    pub percent_complete: Option<u8>,
}

impl ProgressEntry {
    pub fn new(
        timestamp: impl Into<Stamp>,
        message: impl Into<String>,
        percent: Option<u8>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            message: message.into(),
            percent_complete: percent,
        }
    }
}

/// A timestamped summary with the risks and next actions it surfaced.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Reflection {
    /// When the reflection was recorded (UTC)
    pub timestamp: Stamp,

    /// Short summary, never empty
    pub summary: String,

    /// Unique, trimmed, non-empty risks in first-seen order
    pub risks: Vec<String>,

    /// Unique, trimmed, non-empty follow-ups in first-seen order
    pub next_actions: Vec<String>,
}
