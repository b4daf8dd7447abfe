//! Error types for the brief wizard.

use thiserror::Error;

/// Result type alias for brief operations.
pub type BriefResult<T> = Result<T, BriefError>;

/// Errors that can occur while filling in or generating a brief.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BriefError {
    /// The generation service did not produce a usable brief.
    #[error("Brief generation failed: {0}")]
    GenerationFailed(String),

    /// A field name sent by the presentation layer is not one of the ten
    /// brief fields.
    #[error("Unknown brief field: {0}")]
    UnknownField(String),
}
