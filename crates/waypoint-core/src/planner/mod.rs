//! High-level planner API for plan documents.
//!
//! [`Planner`] is the entry point for every interface. Each operation is one
//! synchronous read-mutate-write cycle against a single markdown document:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Operations    │    │   PlanStore     │    │   PlanStorage   │
//! │ (plan_ops,      │───▶│ (resolve, load, │───▶│  (FsStorage or  │
//! │  step_ops,      │    │  save, cleanup) │    │   a test fake)  │
//! │  log_ops)       │    │                 │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!    Validation and        Path guard and        Raw file access
//!    state changes         document codec
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`plan_ops`]: Creating, showing and setting subgoals on a plan
//! - [`step_ops`]: Step status transitions and task decomposition
//! - [`log_ops`]: Progress and reflection logging, with optional cleanup
//!
//! Input is validated before any file is touched. Corrupt documents abort
//! the operation without a write. There is no locking; concurrent writers to
//! the same document follow last-writer-wins.
//!
//! # Usage Examples
//!
//! ```rust
//! use waypoint_core::{
//!     params::{CreatePlan, UpdatePlan},
//!     PlannerBuilder,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workspace = tempfile::TempDir::new()?;
//! let planner = PlannerBuilder::new()
//!     .with_workspace_root(Some(workspace.path()))
//!     .build()?;
//!
//! let created = planner.create_plan(&CreatePlan {
//!     task: "Ship the release".to_string(),
//!     steps: vec!["Build".to_string(), "Publish".to_string()],
//!     ..Default::default()
//! })?;
//! assert_eq!(created.to_string(), "Created plan agent_plan.md with 2 step(s)");
//!
//! planner.update_plan(&UpdatePlan {
//!     step_number: 1,
//!     status: "completed".to_string(),
//!     ..Default::default()
//! })?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::store::PlanStore;

pub mod builder;
pub mod log_ops;
pub mod plan_ops;
pub mod step_ops;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;

/// Main planner interface for managing plan documents.
#[derive(Debug, Clone)]
pub struct Planner {
    pub(crate) store: PlanStore,
}

impl Planner {
    pub(crate) fn new(store: PlanStore) -> Self {
        Self { store }
    }

    /// The canonical workspace root every plan path is resolved against.
    pub fn workspace_root(&self) -> &std::path::Path {
        self.store.workspace().root()
    }
}
