//! Progress and reflection logging, with optional completion and cleanup.

use jiff::Timestamp;
use log::debug;

use super::Planner;
use crate::{
    coerce::normalize_text_items,
    display::{Completion, ProgressLogged, ReflectionRecorded},
    error::Result,
    models::{ProgressEntry, Reflection},
    params::{ReflectOnPlan, TrackProgress},
    store::LoadedPlan,
};

impl Planner {
    /// Appends a progress entry and updates completion.
    ///
    /// An explicit percentage is stored on the plan as given. Passing
    /// `complete_plan` or a percentage of 100 force-completes the plan.
    /// Otherwise the status follows the steps, and the percentage is
    /// recomputed from the steps only when none was given.
    ///
    /// With `cleanup_plan_file` the document is deleted after the save,
    /// provided the plan ended up completed.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the message is blank or the
    ///   percentage is outside 0..=100
    /// * `PlannerError::CleanupRequiresCompletion` - When cleanup was
    ///   requested for a plan that is still active. The entry is saved first.
    pub fn track_progress(&self, params: &TrackProgress) -> Result<Completion<ProgressLogged>> {
        let (message, percent) = params.validate()?;
        let LoadedPlan { path, mut state } = self.store.load(&params.plan_file)?;

        let now = Timestamp::now();
        state
            .progress_log
            .push(ProgressEntry::new(now, message, percent));

        if percent.is_some() {
            state.percent_complete = percent;
        }

        if params.complete_plan || percent == Some(100) {
            debug!("Force-completing plan at {}", path.display());
            state.force_complete();
        } else {
            state.recompute_status();
            if percent.is_none() {
                state.recompute_percent();
            }
        }
        state.updated_at = now.into();

        self.store.save(&path, &state)?;

        let logged = ProgressLogged {
            path: self.store.display_path(&path),
            status: state.status,
            percent_complete: state.percent_complete,
        };
        self.store
            .finish(&path, &state, params.cleanup_plan_file, logged)
    }

    /// Appends a reflection with its risks and next actions.
    ///
    /// With `finalize` the plan is force-completed; otherwise only the
    /// percentage is recomputed from the steps and the status is left alone.
    /// Cleanup behaves as in [`Planner::track_progress`].
    pub fn reflect_on_plan(
        &self,
        params: &ReflectOnPlan,
    ) -> Result<Completion<ReflectionRecorded>> {
        let summary = params.validate()?;
        let LoadedPlan { path, mut state } = self.store.load(&params.plan_file)?;

        let now = Timestamp::now();
        state.reflections.push(Reflection {
            timestamp: now.into(),
            summary,
            risks: normalize_text_items(&params.risks),
            next_actions: normalize_text_items(&params.next_actions),
        });

        if params.finalize {
            debug!("Finalizing plan at {}", path.display());
            state.force_complete();
        } else {
            state.recompute_percent();
        }
        state.updated_at = now.into();

        self.store.save(&path, &state)?;

        let recorded = ReflectionRecorded {
            path: self.store.display_path(&path),
            total: state.reflections.len(),
        };
        self.store
            .finish(&path, &state, params.cleanup_plan_file, recorded)
    }
}
