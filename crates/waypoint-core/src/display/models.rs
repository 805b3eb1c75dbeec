//! Display implementations for domain models.
//!
//! These are the single-line forms used by the document's prose view: a
//! checklist line per item and a timeline line per progress entry.

use std::fmt;

use crate::models::{ChecklistItem, ItemStatus, PlanStatus, ProgressEntry};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `<id>. [x| ] (<status>) <description>`
impl fmt::Display for ChecklistItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. [{}] ({}) {}",
            self.id,
            self.status.checkbox(),
            self.status,
            self.description
        )
    }
}

/// `- <timestamp> | <percent>%|- | <message>`
impl fmt::Display for ProgressEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} | ", self.timestamp)?;
        match self.percent_complete {
            Some(p) => write!(f, "{p}%")?,
            None => write!(f, "-")?,
        }
        write!(f, " | {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    #[test]
    fn test_checklist_item_display() {
        let item = ChecklistItem::new(3, "Run checks", ItemStatus::Blocked);
        assert_eq!(item.to_string(), "3. [ ] (blocked) Run checks");

        let done = ChecklistItem::new(1, "Inspect", ItemStatus::Completed);
        assert_eq!(done.to_string(), "1. [x] (completed) Inspect");
    }

    #[test]
    fn test_progress_entry_display() {
        let ts = Timestamp::from_second(0).unwrap();
        let entry = ProgressEntry::new(ts, "Halfway", Some(50));
        assert_eq!(entry.to_string(), "- 1970-01-01T00:00:00Z | 50% | Halfway");

        let entry = ProgressEntry::new(ts, "Note", None);
        assert_eq!(entry.to_string(), "- 1970-01-01T00:00:00Z | - | Note");
    }
}
