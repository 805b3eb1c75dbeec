//! Data models for the plan document.
//!
//! [`PlanState`] is the single persisted aggregate. Steps and subgoals share
//! the [`ChecklistItem`] shape; the progress log and the reflection log are
//! append-only. Timestamps are [`Stamp`]s. Display implementations live in [`crate::display::models`]
//! and the markdown document itself is produced by [`crate::document`].
//!
//! # Examples
//!
//! ```rust
//! use jiff::Timestamp;
//! use waypoint_core::models::{ItemStatus, PlanState, PlanStatus};
//!
//! let state = PlanState::new(
//!     "Ship the release",
//!     vec!["Build".to_string(), "Publish".to_string()],
//!     Timestamp::now(),
//! );
//! assert_eq!(state.status, PlanStatus::Active);
//! assert_eq!(state.steps[0].status, ItemStatus::InProgress);
//! assert_eq!(state.steps[1].status, ItemStatus::Pending);
//! assert_eq!(state.percent_complete, Some(0));
//! ```

pub mod checklist;
pub mod entries;
pub mod plan;
pub mod stamp;
pub mod status;


pub use checklist::ChecklistItem;
pub use entries::{ProgressEntry, Reflection};
pub use plan::PlanState;
pub use stamp::Stamp;
pub use status::{ItemStatus, PlanStatus};
