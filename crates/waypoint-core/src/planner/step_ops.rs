//! Step operations for the Planner.

use jiff::Timestamp;
use log::debug;

use super::Planner;
use crate::{
    decompose,
    display::{DecomposedSteps, StepUpdated},
    error::{PlannerError, Result},
    models::{ItemStatus, ProgressEntry},
    params::{DecomposeTask, UpdatePlan},
    store::LoadedPlan,
};

impl Planner {
    /// Sets the status of one step.
    ///
    /// Moving a step to `in_progress` demotes any other `in_progress` step to
    /// `pending`. A non-blank note is appended to the progress log without a
    /// percentage. The plan status and percentage are then recomputed from
    /// the steps.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the step number or status is
    ///   invalid (checked before the file is read)
    /// * `PlannerError::NoSteps` - When the plan has no steps
    /// * `PlannerError::StepOutOfRange` - When the step number is past the end
    pub fn update_plan(&self, params: &UpdatePlan) -> Result<StepUpdated> {
        let (step_number, status) = params.validate()?;
        let LoadedPlan { path, mut state } = self.store.load(&params.plan_file)?;

        if state.steps.is_empty() {
            return Err(PlannerError::NoSteps);
        }
        if step_number > state.steps.len() {
            return Err(PlannerError::StepOutOfRange {
                step: params.step_number,
                count: state.steps.len(),
            });
        }

        let index = step_number - 1;
        if status == ItemStatus::InProgress {
            for (i, step) in state.steps.iter_mut().enumerate() {
                if i != index && step.status == ItemStatus::InProgress {
                    debug!("Demoting step {} to pending", i + 1);
                    step.status = ItemStatus::Pending;
                }
            }
        }
        state.steps[index].status = status;

        let now = Timestamp::now();
        if let Some(note) = params.note() {
            state.progress_log.push(ProgressEntry::new(now, note, None));
        }

        state.recompute_status();
        state.recompute_percent();
        state.updated_at = now.into();

        self.store.save(&path, &state)?;

        Ok(StepUpdated {
            path: self.store.display_path(&path),
            step_number,
            status,
        })
    }

    /// Splits a task into ordered steps without touching any plan document.
    pub fn decompose_task(&self, params: &DecomposeTask) -> Result<DecomposedSteps> {
        decompose::decompose_task(&params.task, params.max_steps).map(DecomposedSteps)
    }
}
