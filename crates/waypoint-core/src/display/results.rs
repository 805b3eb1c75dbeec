//! Result types for displaying operation outcomes.
//!
//! Each planner operation returns one of these on success. Their `Display`
//! output is the confirmation text handed back to the calling agent.

use std::fmt;

use crate::models::{ItemStatus, PlanStatus};

/// A successful operation result that renders as a confirmation message.
pub trait Outcome: fmt::Display {
    /// Whether the outcome should be reported as a warning.
    fn is_warning(&self) -> bool {
        false
    }
}

/// Result of `create_plan`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCreated {
    /// Plan path relative to the workspace root
    pub path: String,
    pub step_count: usize,
}

impl fmt::Display for PlanCreated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Created plan {} with {} step(s)",
            self.path, self.step_count
        )
    }
}

impl Outcome for PlanCreated {}

/// Result of `update_plan`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepUpdated {
    pub path: String,
    pub step_number: usize,
    pub status: ItemStatus,
}

impl fmt::Display for StepUpdated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Updated step {} to '{}' in {}",
            self.step_number, self.status, self.path
        )
    }
}

impl Outcome for StepUpdated {}

/// Result of `set_subgoals`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubgoalsSet {
    pub path: String,
    pub count: usize,
    /// Whether the list was replaced rather than appended to
    pub replaced: bool,
}

impl fmt::Display for SubgoalsSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = if self.replaced { "Set" } else { "Updated" };
        write!(f, "{action} {} subgoal(s) in {}", self.count, self.path)
    }
}

impl Outcome for SubgoalsSet {}

/// Result of `track_progress` when the plan file is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressLogged {
    pub path: String,
    pub status: PlanStatus,
    pub percent_complete: Option<u8>,
}

impl fmt::Display for ProgressLogged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Logged progress in {} (status={}, progress=", self.path, self.status)?;
        match self.percent_complete {
            Some(p) => write!(f, "{p}%)"),
            None => write!(f, "n/a)"),
        }
    }
}

impl Outcome for ProgressLogged {}

/// Result of `reflect_on_plan` when the plan file is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionRecorded {
    pub path: String,
    pub total: usize,
}

impl fmt::Display for ReflectionRecorded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Recorded reflection in {} (total reflections={})",
            self.path, self.total
        )
    }
}

impl Outcome for ReflectionRecorded {}

/// Outcome of an operation that may delete the plan file once it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<T> {
    /// The state was saved and the file kept
    Saved(T),
    /// The completed plan was saved and then removed
    Removed { path: String },
    /// The completed plan was saved but removing it failed
    CleanupFailed { path: String, reason: String },
}

impl<T> Completion<T> {
    /// The saved outcome, if the file was kept without a cleanup attempt.
    pub fn saved(&self) -> Option<&T> {
        match self {
            Completion::Saved(inner) => Some(inner),
            _ => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Saved(inner) => write!(f, "{inner}"),
            Completion::Removed { path } => write!(f, "Completed plan and removed {path}"),
            Completion::CleanupFailed { path, reason } => write!(
                f,
                "Plan completed but cleanup failed for '{path}': {reason}"
            ),
        }
    }
}

impl<T: Outcome> Outcome for Completion<T> {
    fn is_warning(&self) -> bool {
        matches!(self, Completion::CleanupFailed { .. })
    }
}

/// Steps produced by `decompose_task`, displayed as a numbered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposedSteps(pub Vec<String>);

impl DecomposedSteps {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for DecomposedSteps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, step) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}. {step}", index + 1)?;
        }
        Ok(())
    }
}

impl Outcome for DecomposedSteps {}
