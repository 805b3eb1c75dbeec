//! Parameter structures for planner operations
//!
//! These structures are shared by every interface (CLI, MCP) and carry no
//! framework-specific derives beyond serde and the optional JSON schema.
//! Interface layers wrap or convert into them:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Omitted fields take the same defaults everywhere: `plan_file` is
//! [`DEFAULT_PLAN_FILE`], `replace` is true, `max_steps` is 6 and every other
//! flag is false. Each struct's `validate` runs the checks that must pass
//! before the plan document is touched.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    coerce::normalize_text_items,
    decompose::DEFAULT_MAX_STEPS,
    error::{PlannerError, Result},
    models::ItemStatus,
};

/// Plan document used when the caller does not name one.
pub const DEFAULT_PLAN_FILE: &str = "agent_plan.md";

fn default_plan_file() -> String {
    DEFAULT_PLAN_FILE.to_string()
}

fn default_max_steps() -> i64 {
    DEFAULT_MAX_STEPS
}

fn default_true() -> bool {
    true
}

fn non_blank(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PlannerError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Parameters for creating a new plan document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Overall goal of the plan (required)
    pub task: String,
    /// Explicit steps; derived from the task when empty
    #[serde(default)]
    pub steps: Vec<String>,
    /// Plan document path, relative to the workspace root
    #[serde(default = "default_plan_file")]
    pub plan_file: String,
    /// Replace an existing plan document at the same path
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for CreatePlan {
    fn default() -> Self {
        Self {
            task: String::new(),
            steps: Vec::new(),
            plan_file: default_plan_file(),
            overwrite: false,
        }
    }
}

impl CreatePlan {
    /// Returns the trimmed task and the normalized explicit steps.
    pub fn validate(&self) -> Result<(String, Vec<String>)> {
        let task = non_blank("task", &self.task)?;
        Ok((task, normalize_text_items(&self.steps)))
    }
}

/// Parameters for changing the status of one step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdatePlan {
    /// 1-based step number
    pub step_number: i64,
    /// New status: 'pending', 'in_progress', 'completed' or 'blocked'
    pub status: String,
    /// Optional note appended to the progress log
    #[serde(default)]
    pub note: String,
    /// Plan document path, relative to the workspace root
    #[serde(default = "default_plan_file")]
    pub plan_file: String,
}

impl Default for UpdatePlan {
    fn default() -> Self {
        Self {
            step_number: 1,
            status: String::new(),
            note: String::new(),
            plan_file: default_plan_file(),
        }
    }
}

impl UpdatePlan {
    /// Validate the step number and parse the status.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When `step_number` is below 1
    /// * `PlannerError::InvalidInput` - When `status` is not a known status
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::{models::ItemStatus, params::UpdatePlan};
    ///
    /// let params = UpdatePlan {
    ///     step_number: 2,
    ///     status: "blocked".to_string(),
    ///     ..Default::default()
    /// };
    /// let (index, status) = params.validate()?;
    /// assert_eq!(index, 2);
    /// assert_eq!(status, ItemStatus::Blocked);
    /// # Ok::<(), waypoint_core::PlannerError>(())
    /// ```
    pub fn validate(&self) -> Result<(usize, ItemStatus)> {
        let step_number = usize::try_from(self.step_number)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| PlannerError::invalid_input("step_number").with_reason("must be >= 1"))?;

        let status = self.status.parse::<ItemStatus>().map_err(|_| {
            let names: Vec<&str> = ItemStatus::ALL.iter().map(ItemStatus::as_str).collect();
            PlannerError::invalid_input("status")
                .with_reason(format!("must be one of: {}", names.join(", ")))
        })?;

        Ok((step_number, status))
    }

    /// The trimmed note, if it has any content.
    pub fn note(&self) -> Option<&str> {
        Some(self.note.trim()).filter(|note| !note.is_empty())
    }
}

/// Parameters for splitting a task into steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DecomposeTask {
    /// Free-text task description
    pub task: String,
    /// Upper bound on the number of returned steps
    #[serde(default = "default_max_steps")]
    pub max_steps: i64,
}

impl Default for DecomposeTask {
    fn default() -> Self {
        Self {
            task: String::new(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Parameters for setting or extending the subgoal checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetSubgoals {
    /// Subgoal descriptions, in order
    pub subgoals: Vec<String>,
    /// Plan document path, relative to the workspace root
    #[serde(default = "default_plan_file")]
    pub plan_file: String,
    /// Replace the existing subgoals instead of appending to them
    #[serde(default = "default_true")]
    pub replace: bool,
}

impl Default for SetSubgoals {
    fn default() -> Self {
        Self {
            subgoals: Vec::new(),
            plan_file: default_plan_file(),
            replace: true,
        }
    }
}

impl SetSubgoals {
    /// Returns the normalized subgoals, rejecting a list with no content.
    pub fn validate(&self) -> Result<Vec<String>> {
        let subgoals = normalize_text_items(&self.subgoals);
        if subgoals.is_empty() {
            return Err(PlannerError::invalid_input("subgoals")
                .with_reason("must include at least one non-empty item"));
        }
        Ok(subgoals)
    }
}

/// Parameters for logging progress against a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TrackProgress {
    /// Progress note (required)
    pub message: String,
    /// Completion percentage in 0..=100; 100 completes the plan
    #[serde(default)]
    pub percent_complete: Option<i64>,
    /// Plan document path, relative to the workspace root
    #[serde(default = "default_plan_file")]
    pub plan_file: String,
    /// Mark every step and subgoal completed
    #[serde(default)]
    pub complete_plan: bool,
    /// Delete the plan document once it is completed
    #[serde(default)]
    pub cleanup_plan_file: bool,
}

impl Default for TrackProgress {
    fn default() -> Self {
        Self {
            message: String::new(),
            percent_complete: None,
            plan_file: default_plan_file(),
            complete_plan: false,
            cleanup_plan_file: false,
        }
    }
}

impl TrackProgress {
    /// Returns the trimmed message and the range-checked percentage.
    pub fn validate(&self) -> Result<(String, Option<u8>)> {
        let message = non_blank("message", &self.message)?;
        let percent = match self.percent_complete {
            None => None,
            Some(value) => Some(
                u8::try_from(value)
                    .ok()
                    .filter(|p| *p <= 100)
                    .ok_or_else(|| {
                        PlannerError::invalid_input("percent_complete")
                            .with_reason("must be between 0 and 100")
                    })?,
            ),
        };
        Ok((message, percent))
    }
}

/// Parameters for recording a reflection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ReflectOnPlan {
    /// Short summary of where the plan stands (required)
    pub summary: String,
    /// Risks surfaced by the reflection
    #[serde(default)]
    pub risks: Vec<String>,
    /// Follow-up actions surfaced by the reflection
    #[serde(default)]
    pub next_actions: Vec<String>,
    /// Plan document path, relative to the workspace root
    #[serde(default = "default_plan_file")]
    pub plan_file: String,
    /// Mark every step and subgoal completed
    #[serde(default)]
    pub finalize: bool,
    /// Delete the plan document once it is completed
    #[serde(default)]
    pub cleanup_plan_file: bool,
}

impl Default for ReflectOnPlan {
    fn default() -> Self {
        Self {
            summary: String::new(),
            risks: Vec::new(),
            next_actions: Vec::new(),
            plan_file: default_plan_file(),
            finalize: false,
            cleanup_plan_file: false,
        }
    }
}

impl ReflectOnPlan {
    /// Returns the trimmed summary.
    pub fn validate(&self) -> Result<String> {
        non_blank("summary", &self.summary)
    }
}

/// Parameters for reading a plan without changing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ShowPlan {
    /// Plan document path, relative to the workspace root
    #[serde(default = "default_plan_file")]
    pub plan_file: String,
}

impl Default for ShowPlan {
    fn default() -> Self {
        Self {
            plan_file: default_plan_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_defaults() {
        let params: TrackProgress = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(params.plan_file, DEFAULT_PLAN_FILE);
        assert_eq!(params.percent_complete, None);
        assert!(!params.complete_plan);
        assert!(!params.cleanup_plan_file);

        let params: SetSubgoals = serde_json::from_str(r#"{"subgoals": ["a"]}"#).unwrap();
        assert!(params.replace);

        let params: DecomposeTask = serde_json::from_str(r#"{"task": "x"}"#).unwrap();
        assert_eq!(params.max_steps, 6);
    }

    #[test]
    fn test_create_plan_validate() {
        let params = CreatePlan {
            task: "  Ship it  ".to_string(),
            steps: vec![" a ".into(), "".into(), "a".into(), "b".into()],
            ..Default::default()
        };
        let (task, steps) = params.validate().unwrap();
        assert_eq!(task, "Ship it");
        assert_eq!(steps, ["a", "b"]);

        let blank = CreatePlan::default();
        assert_eq!(blank.validate().unwrap_err().to_string(), "task must not be empty");
    }

    #[test]
    fn test_update_plan_validate_step_number() {
        for step_number in [0, -3] {
            let params = UpdatePlan {
                step_number,
                status: "completed".into(),
                ..Default::default()
            };
            assert_eq!(
                params.validate().unwrap_err().to_string(),
                "step_number must be >= 1"
            );
        }
    }

    #[test]
    fn test_update_plan_validate_status() {
        let params = UpdatePlan {
            status: "done".into(),
            ..Default::default()
        };
        match params.validate().unwrap_err() {
            PlannerError::InvalidInput { field, reason } => {
                assert_eq!(field, "status");
                assert_eq!(reason, "must be one of: pending, in_progress, completed, blocked");
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }

        // Statuses are case sensitive.
        let params = UpdatePlan {
            status: "Completed".into(),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_update_plan_note() {
        let mut params = UpdatePlan::default();
        assert_eq!(params.note(), None);
        params.note = "   ".into();
        assert_eq!(params.note(), None);
        params.note = " done ".into();
        assert_eq!(params.note(), Some("done"));
    }

    #[test]
    fn test_set_subgoals_validate() {
        let params = SetSubgoals {
            subgoals: vec![" ".into(), "".into()],
            ..Default::default()
        };
        assert_eq!(
            params.validate().unwrap_err().to_string(),
            "subgoals must include at least one non-empty item"
        );
    }

    #[test]
    fn test_track_progress_validate() {
        let mut params = TrackProgress {
            message: " halfway ".into(),
            percent_complete: Some(50),
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap(), ("halfway".to_string(), Some(50)));

        for bad in [-1, 101, 1000] {
            params.percent_complete = Some(bad);
            assert_eq!(
                params.validate().unwrap_err().to_string(),
                "percent_complete must be between 0 and 100"
            );
        }

        params.message = "".into();
        assert_eq!(
            params.validate().unwrap_err().to_string(),
            "message must not be empty"
        );
    }

    #[test]
    fn test_reflect_validate() {
        let params = ReflectOnPlan::default();
        assert_eq!(
            params.validate().unwrap_err().to_string(),
            "summary must not be empty"
        );
    }
}
