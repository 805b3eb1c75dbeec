//! File-level persistence of plan documents.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use jiff::Timestamp;
use log::{debug, info, warn};

use crate::{
    coerce::coerce_state,
    display::Completion,
    document,
    error::{IoResultExt, PlannerError, Result},
    models::PlanState,
    storage::{EntryKind, PlanStorage},
    workspace::Workspace,
};

/// A plan read from disk together with the absolute path it came from.
#[derive(Debug, Clone)]
pub struct LoadedPlan {
    pub path: PathBuf,
    pub state: PlanState,
}

/// Reads and writes plan documents inside a workspace.
#[derive(Clone)]
pub struct PlanStore {
    workspace: Workspace,
    storage: Arc<dyn PlanStorage>,
}

impl fmt::Debug for PlanStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanStore")
            .field("workspace", &self.workspace)
            .finish_non_exhaustive()
    }
}

impl PlanStore {
    pub fn new(workspace: Workspace, storage: Arc<dyn PlanStorage>) -> Self {
        Self { workspace, storage }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Resolves a caller-supplied plan path inside the workspace.
    pub fn resolve(&self, plan_file: &str) -> Result<PathBuf> {
        self.workspace.resolve(plan_file)
    }

    /// Classifies what currently sits at `path`.
    pub fn kind(&self, path: &Path) -> EntryKind {
        self.storage.kind(path)
    }

    /// Path rendered relative to the workspace root, for messages.
    pub fn display_path(&self, path: &Path) -> String {
        self.workspace.relative(path)
    }

    /// Loads and coerces the plan stored at `plan_file`.
    ///
    /// # Errors
    ///
    /// - [`PlannerError::OutsideWorkspace`] if the path escapes the root
    /// - [`PlannerError::PlanNotFound`] / [`PlannerError::NotAFile`] if there
    ///   is no regular file at the path
    /// - [`PlannerError::FileSystem`] if reading fails
    /// - a corruption error from [`document::extract_state`]
    pub fn load(&self, plan_file: &str) -> Result<LoadedPlan> {
        let path = self.resolve(plan_file)?;

        match self.storage.kind(&path) {
            EntryKind::File => {}
            EntryKind::Missing => {
                return Err(PlannerError::PlanNotFound {
                    path: plan_file.to_string(),
                })
            }
            EntryKind::Directory | EntryKind::Other => {
                return Err(PlannerError::NotAFile {
                    path: plan_file.to_string(),
                })
            }
        }

        let content = self.storage.read_to_string(&path).fs_context("read", &path)?;
        let raw = document::extract_state(&content)?;
        let state = coerce_state(&raw, Timestamp::now());

        debug!(
            "Loaded plan from {} ({} steps, {} subgoals)",
            path.display(),
            state.steps.len(),
            state.subgoals.len()
        );
        Ok(LoadedPlan { path, state })
    }

    /// Renders and writes the document for `state` to `path`.
    pub fn save(&self, path: &Path, state: &PlanState) -> Result<()> {
        let content = document::render(state)?;
        self.storage
            .write(path, &content)
            .fs_context("write plan file", path)?;
        info!("Saved plan to {}", self.display_path(path));
        Ok(())
    }

    /// Applies the optional cleanup that follows a successful save.
    ///
    /// Without `cleanup` the saved outcome is returned unchanged. With it, the
    /// document is deleted only when the plan is completed; a failed delete
    /// is downgraded to [`Completion::CleanupFailed`] because the completed
    /// state is already on disk.
    pub fn finish<T>(
        &self,
        path: &Path,
        state: &PlanState,
        cleanup: bool,
        saved: T,
    ) -> Result<Completion<T>> {
        if !cleanup {
            return Ok(Completion::Saved(saved));
        }
        if !state.status.is_completed() {
            return Err(PlannerError::CleanupRequiresCompletion);
        }

        let display = self.display_path(path);
        match self.storage.remove(path) {
            Ok(()) => {
                info!("Removed completed plan {display}");
                Ok(Completion::Removed { path: display })
            }
            Err(e) => {
                warn!("Plan completed but cleanup failed for {display}: {e}");
                Ok(Completion::CleanupFailed {
                    path: display,
                    reason: e.to_string(),
                })
            }
        }
    }
}
