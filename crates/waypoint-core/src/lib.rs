//! Core library for the Waypoint plan tracker.
//!
//! A plan is a single markdown document inside a workspace directory. The
//! document has a human-readable part, regenerated on every write, and an
//! embedded JSON block that holds the authoritative state. Every operation
//! loads the JSON block, repairs it into a well-formed [`models::PlanState`],
//! applies one change and rewrites the whole document.
//!
//! # Layers
//!
//! - **Path guard** ([`workspace`]): confines plan paths to the workspace root
//! - **Storage** ([`storage`]): swappable read/write/delete primitive
//! - **State coercer** ([`coerce`]): tolerant repair of decoded JSON
//! - **Document codec** ([`document`]): markdown rendering and state extraction
//! - **Plan store** ([`store`]): load, save and cleanup of one document
//! - **Operations** ([`planner`]): the public API, fed by [`params`] and
//!   answering with the outcome types in [`display`]
//!
//! # Quick Start
//!
//! ```rust
//! use waypoint_core::{
//!     params::{CreatePlan, TrackProgress},
//!     OperationStatus, PlannerBuilder,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workspace = tempfile::TempDir::new()?;
//! let planner = PlannerBuilder::new()
//!     .with_workspace_root(Some(workspace.path()))
//!     .build()?;
//!
//! planner.create_plan(&CreatePlan {
//!     task: "Inspect code then implement the fix then run tests".to_string(),
//!     ..Default::default()
//! })?;
//!
//! let reply = OperationStatus::from_result(planner.track_progress(&TrackProgress {
//!     message: "Fix is in".to_string(),
//!     percent_complete: Some(60),
//!     ..Default::default()
//! }));
//! assert_eq!(
//!     reply.to_string(),
//!     "Logged progress in agent_plan.md (status=active, progress=60%)"
//! );
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod coerce;
pub mod decompose;
pub mod display;
pub mod document;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;
pub mod storage;
pub mod store;
pub mod workspace;

// Re-export commonly used types
pub use display::{OperationStatus, Outcome, StatusKind};
pub use error::{PlannerError, Result};
pub use models::{
    ChecklistItem, ItemStatus, PlanState, PlanStatus, ProgressEntry, Reflection, Stamp,
};
pub use params::{
    CreatePlan, DecomposeTask, ReflectOnPlan, SetSubgoals, ShowPlan, TrackProgress, UpdatePlan,
    DEFAULT_PLAN_FILE,
};
pub use planner::{Planner, PlannerBuilder};
pub use storage::{EntryKind, FsStorage, PlanStorage};
