//! Status enumerations for plans and checklist items.

use std::str::FromStr;

use serde::Serialize;

/// Overall plan status. Derived from the checklists, never set directly by a
/// caller outside the completion paths.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Plan still has outstanding work
    #[default]
    Active,

    /// Every step has been completed
    Completed,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PlanStatus::Active),
            "completed" => Ok(PlanStatus::Completed),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// String form used in the document and in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Completed => "completed",
        }
    }

    /// Whether the plan has reached its terminal state.
    pub fn is_completed(&self) -> bool {
        matches!(self, PlanStatus::Completed)
    }
}

/// Status of a single step or subgoal.
///
/// Transitions are caller driven: `pending -> in_progress -> completed`, with
/// `blocked` reachable from any state and able to move back to any other.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Not started yet
    #[default]
    Pending,

    /// Currently being worked on
    InProgress,

    /// Finished
    Completed,

    /// Waiting on something outside the plan
    Blocked,
}

impl ItemStatus {
    /// All accepted statuses, in the order they are listed to callers.
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Pending,
        ItemStatus::InProgress,
        ItemStatus::Completed,
        ItemStatus::Blocked,
    ];

    /// String form used in the document and in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::InProgress => "in_progress",
            ItemStatus::Completed => "completed",
            ItemStatus::Blocked => "blocked",
        }
    }

    /// Checkbox mark used by the markdown checklist view.
    ///
    /// Only completed items are checked; every other status renders an empty
    /// box and relies on the `(status)` label.
    pub fn checkbox(&self) -> char {
        match self {
            ItemStatus::Completed => 'x',
            _ => ' ',
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ItemStatus::Completed)
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    /// Parses the exact lowercase names. Unlike the coercer, this is strict:
    /// callers passing an unknown status get an error rather than `pending`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ItemStatus::Pending),
            "in_progress" => Ok(ItemStatus::InProgress),
            "completed" => Ok(ItemStatus::Completed),
            "blocked" => Ok(ItemStatus::Blocked),
            _ => Err(format!("Invalid item status: {s}")),
        }
    }
}
