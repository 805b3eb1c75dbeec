//! The persisted plan aggregate.

use jiff::Timestamp;
use serde::Serialize;

use super::{
    checklist::{all_completed, build_items, mark_all_completed},
    ChecklistItem, ItemStatus, PlanStatus, ProgressEntry, Reflection, Stamp,
};

/// Message of the progress entry written when a plan is created.
pub const PLAN_CREATED_MESSAGE: &str = "Plan created";

/// Complete state of one plan document.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlanState {
    /// Overall goal, fixed at creation
    pub task: String,

    /// Derived plan status
    pub status: PlanStatus,

    /// When the plan was created
    pub created_at: Stamp,

    /// When the plan was last changed
    pub updated_at: Stamp,

    /// Completion percentage in 0..=100, if known
    pub percent_complete: Option<u8>,

    /// Ordered implementation steps
    pub steps: Vec<ChecklistItem>,

    /// Desired qualities of the result, tracked independently of steps
    pub subgoals: Vec<ChecklistItem>,

    /// Append-only progress timeline
    pub progress_log: Vec<ProgressEntry>,

    /// Append-only reflection log
    pub reflections: Vec<Reflection>,
}

impl PlanState {
    /// Fresh state for a new plan. The first step starts `in_progress`.
    pub fn new(task: impl Into<String>, steps: Vec<String>, now: Timestamp) -> Self {
        let mut steps = build_items(steps, ItemStatus::Pending);
        if let Some(first) = steps.first_mut() {
            first.status = ItemStatus::InProgress;
        }

        Self {
            task: task.into(),
            status: PlanStatus::Active,
            created_at: now.into(),
            updated_at: now.into(),
            percent_complete: Some(0),
            steps,
            subgoals: Vec::new(),
            progress_log: vec![ProgressEntry::new(now, PLAN_CREATED_MESSAGE, Some(0))],
            reflections: Vec::new(),
        }
    }

    /// Percentage of completed steps, rounded half to even. Zero without steps.
    pub fn step_percent(&self) -> u8 {
        percent_of(&self.steps)
    }

    /// Recomputes `percent_complete` from the step ratio.
    pub fn recompute_percent(&mut self) {
        self.percent_complete = Some(self.step_percent());
    }

    /// Recomputes `status` from the steps: completed iff every step is.
    pub fn recompute_status(&mut self) {
        self.status = if all_completed(&self.steps) {
            PlanStatus::Completed
        } else {
            PlanStatus::Active
        };
    }

    /// Marks every step and subgoal completed and closes the plan at 100%.
    pub fn force_complete(&mut self) {
        mark_all_completed(&mut self.steps);
        mark_all_completed(&mut self.subgoals);
        self.status = PlanStatus::Completed;
        self.percent_complete = Some(100);
    }

    /// Number of steps currently `in_progress`.
    pub fn active_step_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.status == ItemStatus::InProgress)
            .count()
    }
}

fn percent_of(items: &[ChecklistItem]) -> u8 {
    if items.is_empty() {
        return 0;
    }
    let completed = items.iter().filter(|item| item.status.is_completed()).count();
    let ratio = completed as f64 / items.len() as f64 * 100.0;
    ratio.round_ties_even() as u8
}
