//! Error types for the content module.

use thiserror::Error;

use crate::versions::VersionStatus;

/// Result type alias for content operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors that can occur in the content registry and release workflow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Unknown difficulty: {0} (expected beginner, intermediate, advanced or all)")]
    UnknownDifficulty(String),

    #[error("Version not found: {0}")]
    VersionNotFound(String),

    #[error("Cannot {action} version {version} while it is {status}")]
    InvalidTransition {
        version: String,
        status: VersionStatus,
        action: String,
    },
}
