//! Checklist items shared by steps and subgoals.

use serde::Serialize;

use super::ItemStatus;

/// A numbered description/status pair.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChecklistItem {
    /// 1-based position within its checklist
    pub id: u32,

    /// What the item is about, never empty
    pub description: String,

    /// Current status of the item
    pub status: ItemStatus,
}

impl ChecklistItem {
    pub fn new(id: u32, description: impl Into<String>, status: ItemStatus) -> Self {
        Self {
            id,
            description: description.into(),
            status,
        }
    }
}

/// Builds a dense 1..N checklist from `(description, status)` pairs.
pub fn number_items<I, S>(items: I) -> Vec<ChecklistItem>
where
    I: IntoIterator<Item = (S, ItemStatus)>,
    S: Into<String>,
{
    items
        .into_iter()
        .zip(1u32..)
        .map(|((description, status), id)| ChecklistItem::new(id, description, status))
        .collect()
}

/// Builds a checklist where every description starts with the same status.
pub fn build_items<I, S>(descriptions: I, status: ItemStatus) -> Vec<ChecklistItem>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    number_items(descriptions.into_iter().map(|d| (d, status)))
}

/// Marks every item as completed.
pub fn mark_all_completed(items: &mut [ChecklistItem]) {
    for item in items.iter_mut() {
        item.status = ItemStatus::Completed;
    }
}

/// True when the checklist is non-empty and every item is completed.
pub fn all_completed(items: &[ChecklistItem]) -> bool {
    !items.is_empty() && items.iter().all(|item| item.status.is_completed())
}
