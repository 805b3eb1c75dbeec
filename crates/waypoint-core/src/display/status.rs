//! Status and confirmation message types for operation feedback.

use std::fmt;

use super::results::Outcome;
use crate::error::Result;

/// How an operation ended, as far as the caller is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// The operation did what was asked
    Success,
    /// The authoritative state was saved but a follow-up step failed
    Warning,
    /// Nothing was changed, or the write itself failed
    Failure,
}

/// Wrapper type for displaying operation confirmation messages.
///
/// Success messages render as-is; warnings and failures carry a `Warning:` or
/// `Error:` prefix so callers can branch on a simple prefix check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationStatus {
    pub message: String,
    pub kind: StatusKind,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            kind: StatusKind::Success,
        }
    }

    /// Create a new warning status.
    pub fn warning(message: String) -> Self {
        Self {
            message,
            kind: StatusKind::Warning,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            kind: StatusKind::Failure,
        }
    }

    /// Collapses an operation result into its reply message.
    pub fn from_result<T: Outcome>(result: Result<T>) -> Self {
        match result {
            Ok(outcome) if outcome.is_warning() => Self::warning(outcome.to_string()),
            Ok(outcome) => Self::success(outcome.to_string()),
            Err(e) => Self::failure(e.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == StatusKind::Failure
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StatusKind::Success => write!(f, "{}", self.message),
            StatusKind::Warning => write!(f, "Warning: {}", self.message),
            StatusKind::Failure => write!(f, "Error: {}", self.message),
        }
    }
}
