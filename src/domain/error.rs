//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed catalog data.
/// The course store itself never fails; these are raised while building records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("course code must not be empty")]
    EmptyCourseCode,

    #[error("malformed course line '{line}': {reason}")]
    MalformedLine { line: String, reason: String },
}
