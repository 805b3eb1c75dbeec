//! Display formatting and result types.
//!
//! Domain models implement [`std::fmt::Display`] for the one-line forms used
//! in the plan document (see [`models`]). Operation results are small structs
//! in [`results`] whose `Display` output is the confirmation text, and
//! [`OperationStatus`] folds a `Result` into the final reply string.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Planner      │    │  Outcome types  │    │ OperationStatus │
//! │   operation     │───▶│  (PlanCreated,  │───▶│  "Error: ..."   │
//! │                 │    │  Completion, …) │    │  "Warning: ..." │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use waypoint_core::display::{OperationStatus, PlanCreated};
//!
//! let reply = OperationStatus::from_result(Ok(PlanCreated {
//!     path: "agent_plan.md".to_string(),
//!     step_count: 2,
//! }));
//! assert_eq!(reply.to_string(), "Created plan agent_plan.md with 2 step(s)");
//! ```

pub mod models;
pub mod results;
pub mod status;

pub use results::{
    Completion, DecomposedSteps, Outcome, PlanCreated, ProgressLogged, ReflectionRecorded,
    StepUpdated, SubgoalsSet,
};
pub use status::{OperationStatus, StatusKind};
