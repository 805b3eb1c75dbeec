//! Plan-level operations: creation, inspection and subgoals.

use std::collections::HashMap;

use jiff::Timestamp;
use log::debug;

use super::Planner;
use crate::{
    coerce::normalize_text_items,
    decompose::{decompose_task, DEFAULT_MAX_STEPS},
    display::{PlanCreated, SubgoalsSet},
    error::{PlannerError, Result},
    models::{checklist::number_items, ItemStatus, PlanState},
    params::{CreatePlan, SetSubgoals, ShowPlan},
    storage::EntryKind,
    store::LoadedPlan,
};

impl Planner {
    /// Creates a new plan document.
    ///
    /// Without explicit steps the task is decomposed into up to six steps.
    /// The first step starts `in_progress` and the progress log opens with a
    /// single `Plan created` entry at 0%.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the task is blank
    /// * `PlannerError::AlreadyExists` - When the file exists and `overwrite`
    ///   is not set
    /// * `PlannerError::IsDirectory` - When the path names a directory
    pub fn create_plan(&self, params: &CreatePlan) -> Result<PlanCreated> {
        let (task, mut steps) = params.validate()?;
        if steps.is_empty() {
            steps = decompose_task(&task, DEFAULT_MAX_STEPS)?;
            debug!("Derived {} step(s) from task", steps.len());
        }

        let path = self.store.resolve(&params.plan_file)?;
        match self.store.kind(&path) {
            EntryKind::Missing => {}
            _ if !params.overwrite => {
                return Err(PlannerError::AlreadyExists {
                    path: params.plan_file.clone(),
                })
            }
            EntryKind::Directory => {
                return Err(PlannerError::IsDirectory {
                    path: params.plan_file.clone(),
                })
            }
            EntryKind::File | EntryKind::Other => {}
        }

        let state = PlanState::new(task, steps, Timestamp::now());
        self.store.save(&path, &state)?;

        Ok(PlanCreated {
            path: self.store.display_path(&path),
            step_count: state.steps.len(),
        })
    }

    /// Loads a plan without modifying it.
    pub fn show_plan(&self, params: &ShowPlan) -> Result<PlanState> {
        let LoadedPlan { state, .. } = self.store.load(&params.plan_file)?;
        Ok(state)
    }

    /// Replaces or extends the subgoal checklist.
    ///
    /// Subgoals whose description already exists keep their status; new ones
    /// start `pending`. The resulting list is renumbered from 1. Appending
    /// the same list twice leaves the checklist unchanged.
    pub fn set_subgoals(&self, params: &SetSubgoals) -> Result<SubgoalsSet> {
        let subgoals = params.validate()?;
        let LoadedPlan { path, mut state } = self.store.load(&params.plan_file)?;

        let current = std::mem::take(&mut state.subgoals);
        let status_by_description: HashMap<&str, ItemStatus> = current
            .iter()
            .map(|item| (item.description.as_str(), item.status))
            .collect();

        let merged = if params.replace {
            subgoals
        } else {
            normalize_text_items(
                current
                    .iter()
                    .map(|item| item.description.as_str())
                    .chain(subgoals.iter().map(String::as_str)),
            )
        };

        state.subgoals = number_items(merged.into_iter().map(|description| {
            let status = status_by_description
                .get(description.as_str())
                .copied()
                .unwrap_or_default();
            (description, status)
        }));
        state.updated_at = Timestamp::now().into();

        let count = state.subgoals.len();
        self.store.save(&path, &state)?;

        Ok(SubgoalsSet {
            path: self.store.display_path(&path),
            count,
            replaced: params.replace,
        })
    }
}
