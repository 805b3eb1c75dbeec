//! Builder for creating and configuring Planner instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;

use super::Planner;
use crate::{
    error::Result,
    storage::{FsStorage, PlanStorage},
    store::PlanStore,
    workspace::Workspace,
};

/// Builder for creating and configuring Planner instances.
#[derive(Clone)]
pub struct PlannerBuilder {
    workspace_root: Option<PathBuf>,
    storage: Option<Arc<dyn PlanStorage>>,
}

impl std::fmt::Debug for PlannerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannerBuilder")
            .field("workspace_root", &self.workspace_root)
            .field("custom_storage", &self.storage.is_some())
            .finish()
    }
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            workspace_root: None,
            storage: None,
        }
    }

    /// Sets the workspace root that confines every plan path.
    ///
    /// If not specified, the current working directory is used.
    pub fn with_workspace_root<P: AsRef<Path>>(mut self, root: Option<P>) -> Self {
        if let Some(root) = root {
            self.workspace_root = Some(root.as_ref().to_path_buf());
        }
        self
    }

    /// Replaces the file system backend.
    pub fn with_storage(mut self, storage: impl PlanStorage + 'static) -> Self {
        self.storage = Some(Arc::new(storage));
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the workspace root cannot be
    /// canonicalized, or `PlannerError::Configuration` if it is not a
    /// directory
    pub fn build(self) -> Result<Planner> {
        let workspace = match self.workspace_root {
            Some(root) => Workspace::new(root)?,
            None => Workspace::current_dir()?,
        };
        let storage = self.storage.unwrap_or_else(|| Arc::new(FsStorage));

        debug!("Planner workspace root: {}", workspace.root().display());
        Ok(Planner::new(PlanStore::new(workspace, storage)))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
