//! Tolerant conversion of decoded JSON into a well-formed [`PlanState`].
//!
//! The backing document may be hand-edited or half-written by a crashed
//! process, so loading never fails past the JSON decode: wrong-typed fields
//! fall back to their defaults and malformed list entries are dropped.
//!
//! Scalar text fields accept strings, numbers and booleans. `null`, arrays
//! and objects count as empty text, which drops the entry that owns them.

use std::collections::HashSet;

use jiff::Timestamp;
use log::debug;
use serde_json::{Map, Value};

use crate::models::{
    checklist::number_items, ChecklistItem, ItemStatus, PlanState, PlanStatus, ProgressEntry,
    Reflection, Stamp,
};

/// Trims entries, drops empty ones and removes duplicates, keeping the first
/// occurrence of each value in its original position.
pub fn normalize_text_items<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter_map(|raw| {
            let text = raw.as_ref().trim();
            (!text.is_empty() && seen.insert(text.to_string())).then(|| text.to_string())
        })
        .collect()
}

/// Builds a valid plan state from any decoded JSON value.
///
/// Non-object input yields an empty, active plan stamped with `now`.
pub fn coerce_state(raw: &Value, now: Timestamp) -> PlanState {
    let empty = Map::new();
    let raw = raw.as_object().unwrap_or(&empty);

    let created_at = timestamp(raw.get("created_at")).unwrap_or(Stamp::At(now));
    let updated_at = timestamp(raw.get("updated_at")).unwrap_or_else(|| created_at.clone());

    PlanState {
        task: text(raw.get("task")),
        status: plan_status(raw.get("status")),
        created_at,
        updated_at,
        percent_complete: percent(raw.get("percent_complete")),
        steps: coerce_items(raw.get("steps")),
        subgoals: coerce_items(raw.get("subgoals")),
        progress_log: coerce_progress(raw.get("progress_log"), now),
        reflections: coerce_reflections(raw.get("reflections"), now),
    }
}

/// Normalizes a steps or subgoals list. Plain strings become `pending` items;
/// objects contribute `description` and `status`. Survivors are renumbered.
pub fn coerce_items(raw: Option<&Value>) -> Vec<ChecklistItem> {
    let Some(entries) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };

    let kept = entries.iter().filter_map(|entry| {
        let (description, status) = match entry {
            Value::Object(obj) => (text(obj.get("description")), item_status(obj.get("status"))),
            other => (text(Some(other)), ItemStatus::Pending),
        };
        if description.is_empty() {
            debug!("Dropping checklist entry without description: {entry}");
            return None;
        }
        Some((description, status))
    });

    number_items(kept)
}

fn coerce_progress(raw: Option<&Value>, now: Timestamp) -> Vec<ProgressEntry> {
    let Some(entries) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let obj = entry.as_object()?;
            let message = text(obj.get("message"));
            if message.is_empty() {
                debug!("Dropping progress entry without message: {entry}");
                return None;
            }
            Some(ProgressEntry {
                timestamp: timestamp(obj.get("timestamp")).unwrap_or(Stamp::At(now)),
                message,
                percent_complete: percent(obj.get("percent_complete")),
            })
        })
        .collect()
}

fn coerce_reflections(raw: Option<&Value>, now: Timestamp) -> Vec<Reflection> {
    let Some(entries) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let obj = entry.as_object()?;
            let summary = text(obj.get("summary"));
            if summary.is_empty() {
                debug!("Dropping reflection without summary: {entry}");
                return None;
            }
            Some(Reflection {
                timestamp: timestamp(obj.get("timestamp")).unwrap_or(Stamp::At(now)),
                summary,
                risks: text_list(obj.get("risks")),
                next_actions: text_list(obj.get("next_actions")),
            })
        })
        .collect()
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => normalize_text_items(items.iter().map(|v| text(Some(v)))),
        Some(single @ Value::String(_)) => normalize_text_items([text(Some(single))]),
        _ => Vec::new(),
    }
}

/// Blank values are absent. Anything else is kept, verbatim when it does not
/// parse.
fn timestamp(value: Option<&Value>) -> Option<Stamp> {
    let raw = text(value);
    if raw.is_empty() {
        return None;
    }
    let stamp = Stamp::parse(&raw);
    if matches!(stamp, Stamp::Verbatim(_)) {
        debug!("Keeping unparsable timestamp '{raw}' as written");
    }
    Some(stamp)
}

fn percent(value: Option<&Value>) -> Option<u8> {
    value
        .and_then(Value::as_i64)
        .filter(|p| (0..=100).contains(p))
        .and_then(|p| u8::try_from(p).ok())
}

fn plan_status(value: Option<&Value>) -> PlanStatus {
    text(value).parse().unwrap_or_default()
}

fn item_status(value: Option<&Value>) -> ItemStatus {
    text(value).parse().unwrap_or_default()
}
