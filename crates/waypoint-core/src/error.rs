//! Error types for the planner library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all planner operations.
///
/// The `Display` text is the human-readable reason; [`crate::display::OperationStatus`]
/// adds the `Error:` prefix callers branch on.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Invalid input validation errors, raised before any I/O
    #[error("{field} {reason}")]
    InvalidInput { field: String, reason: String },
    /// The requested path resolves outside the workspace root
    #[error("Path '{path}' is outside workspace root '{root}'")]
    OutsideWorkspace { path: String, root: String },
    /// No plan document at the requested path
    #[error("Plan file '{path}' not found")]
    PlanNotFound { path: String },
    /// The requested path exists but is not a regular file
    #[error("'{path}' is not a file")]
    NotAFile { path: String },
    /// The requested path is a directory where a plan file was expected
    #[error("'{path}' is a directory")]
    IsDirectory { path: String },
    /// Refusing to replace an existing plan document
    #[error("Plan file '{path}' already exists and overwrite is False")]
    AlreadyExists { path: String },
    /// File system operation errors
    #[error("Unable to {action} '{path}': {source}")]
    FileSystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The document has no embedded state block
    #[error("Plan file is missing embedded JSON state markers")]
    MissingStateMarkers,
    /// The embedded state block is not valid JSON
    #[error("Plan file contains invalid JSON state: {source}")]
    InvalidState {
        #[from]
        source: serde_json::Error,
    },
    /// The embedded state block decoded to something other than an object
    #[error("Plan state must be a JSON object")]
    StateNotObject,
    /// The plan has an empty step list
    #[error("Plan has no steps to update")]
    NoSteps,
    /// A step number past the end of the step list
    #[error("step_number {step} is out of range (1..{count})")]
    StepOutOfRange { step: i64, count: usize },
    /// Cleanup was requested for a plan that is still active
    #[error("cleanup_plan_file requires a completed plan")]
    CleanupRequiresCompletion,
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a file system error for the given action and path.
    pub fn file_system(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// Whether the error rejected the call before any I/O took place.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::OutsideWorkspace { .. })
    }

    /// Whether the error means the on-disk document is unreadable as a plan.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::MissingStateMarkers | Self::InvalidState { .. } | Self::StateNotObject
        )
    }
}

/// Extension trait for mapping I/O results onto [`PlannerError::FileSystem`].
pub trait IoResultExt<T> {
    /// Attach the attempted action and the path involved.
    fn fs_context(self, action: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| PlannerError::file_system(action, path, e))
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = PlannerError::invalid_input("task").with_reason("must not be empty");
        assert_eq!(err.to_string(), "task must not be empty");
        assert!(err.is_validation());
        assert!(!err.is_corruption());
    }

    #[test]
    fn test_corruption_classification() {
        assert!(PlannerError::MissingStateMarkers.is_corruption());
        assert!(PlannerError::StateNotObject.is_corruption());
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = PlannerError::from(json_err);
        assert!(err.is_corruption());
        assert!(err
            .to_string()
            .starts_with("Plan file contains invalid JSON state:"));
    }

    #[test]
    fn test_fs_context() {
        let io: std::io::Result<()> = Err(std::io::Error::other("disk full"));
        let err = io.fs_context("write plan file", "/tmp/plan.md").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to write plan file '/tmp/plan.md': disk full"
        );
    }
}
