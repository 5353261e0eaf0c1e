//! Domain layer: course records and the ordered course store
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod store;

pub use entities::{normalize_code, parse_course_line, Course, CourseCatalog, CourseCode, SkippedLine};
pub use error::DomainError;
pub use store::{CourseStore, InOrderIterator};

/// Expand environment variables and `~` in a path string.
///
/// Falls back to the input unchanged when a variable is undefined.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
