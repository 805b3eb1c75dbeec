//! The plan document codec.
//!
//! A plan document is markdown with two parts: a prose view of the state
//! (summary, checklists, progress timeline, reflections) and, after a `---`
//! rule, the full state as pretty-printed JSON with sorted keys, fenced and
//! wrapped in two sentinel comments.
//!
//! Only the JSON block is ever read back. The prose is regenerated from the
//! state on every write, so hand edits to it are discarded while hand edits
//! to the JSON block survive (through [`crate::coerce`]).

use std::{
    fmt::{self, Write as _},
    sync::LazyLock,
};

use regex::Regex;
use serde_json::Value;

use crate::{
    error::{PlannerError, Result},
    models::{ChecklistItem, PlanState, ProgressEntry, Reflection},
};

/// Opening sentinel of the embedded state block.
pub const STATE_START: &str = "<!-- PLAN_STATE_JSON_START -->";

/// Closing sentinel of the embedded state block.
pub const STATE_END: &str = "<!-- PLAN_STATE_JSON_END -->";

static STATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s){}\s*```json\s*(.*?)\s*```\s*{}",
        regex::escape(STATE_START),
        regex::escape(STATE_END)
    ))
    .expect("state block pattern is valid")
});

/// Renders the full document for a state.
pub fn render(state: &PlanState) -> Result<String> {
    let json = state_json(state)?;
    let mut out = String::new();
    write_document(&mut out, state, &json).map_err(|e| PlannerError::Configuration {
        message: format!("failed to render plan document: {e}"),
    })?;
    Ok(out)
}

/// Canonical JSON encoding of the state: two-space indent, keys sorted.
pub fn state_json(state: &PlanState) -> Result<String> {
    // Going through `Value` sorts object keys, since serde_json's map is
    // ordered by key unless `preserve_order` is enabled.
    let value = serde_json::to_value(state)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Extracts and decodes the embedded state block.
///
/// # Errors
///
/// - [`PlannerError::MissingStateMarkers`] when the sentinel-wrapped fence is absent
/// - [`PlannerError::InvalidState`] when the fenced text is not valid JSON
/// - [`PlannerError::StateNotObject`] when the JSON is not an object
pub fn extract_state(content: &str) -> Result<Value> {
    let captured = STATE_PATTERN
        .captures(content)
        .and_then(|caps| caps.get(1))
        .ok_or(PlannerError::MissingStateMarkers)?;

    let value: Value = serde_json::from_str(captured.as_str())?;
    if !value.is_object() {
        return Err(PlannerError::StateNotObject);
    }
    Ok(value)
}

fn write_document(out: &mut String, state: &PlanState, json: &str) -> fmt::Result {
    let progress = match state.percent_complete {
        Some(p) => format!("{p}%"),
        None => "n/a".to_string(),
    };

    writeln!(out, "# Agent Plan")?;
    writeln!(out)?;
    writeln!(out, "## Summary")?;
    writeln!(out, "- Task: {}", state.task)?;
    writeln!(out, "- Status: {}", state.status)?;
    writeln!(out, "- Progress: {progress}")?;
    writeln!(out, "- Created (UTC): {}", state.created_at)?;
    writeln!(out, "- Updated (UTC): {}", state.updated_at)?;
    writeln!(out)?;
    writeln!(out, "## Steps")?;
    write_items(out, &state.steps)?;
    writeln!(out)?;
    writeln!(out, "## Subgoals")?;
    write_items(out, &state.subgoals)?;
    writeln!(out)?;
    writeln!(out, "## Progress Log")?;
    write_progress(out, &state.progress_log)?;
    writeln!(out)?;
    writeln!(out, "## Reflections")?;
    write_reflections(out, &state.reflections)?;
    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out, "{STATE_START}")?;
    writeln!(out, "```json")?;
    writeln!(out, "{json}")?;
    writeln!(out, "```")?;
    writeln!(out, "{STATE_END}")
}

fn write_items(out: &mut String, items: &[ChecklistItem]) -> fmt::Result {
    if items.is_empty() {
        return writeln!(out, "- (none)");
    }
    for item in items {
        writeln!(out, "{item}")?;
    }
    Ok(())
}

fn write_progress(out: &mut String, entries: &[ProgressEntry]) -> fmt::Result {
    if entries.is_empty() {
        return writeln!(out, "- (none)");
    }
    for entry in entries {
        writeln!(out, "{entry}")?;
    }
    Ok(())
}

fn write_reflections(out: &mut String, reflections: &[Reflection]) -> fmt::Result {
    if reflections.is_empty() {
        return writeln!(out, "- (none)");
    }
    for (index, reflection) in reflections.iter().enumerate() {
        writeln!(out, "### Reflection {} ({})", index + 1, reflection.timestamp)?;
        writeln!(out, "{}", reflection.summary)?;
        if !reflection.risks.is_empty() {
            writeln!(out, "Risks:")?;
            for risk in &reflection.risks {
                writeln!(out, "- {risk}")?;
            }
        }
        if !reflection.next_actions.is_empty() {
            writeln!(out, "Next Actions:")?;
            for action in &reflection.next_actions {
                writeln!(out, "- {action}")?;
            }
        }
    }
    Ok(())
}
