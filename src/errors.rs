//! Error types for the annotation engine
//!
//! Only conditions that a caller may want to report live here. A chat line
//! that is not a command and a comment that is already present are normal
//! traffic, not errors.

use thiserror::Error;

/// Failures reported by annotation operations
///
/// None of these is fatal: each one means a single annotation attempt was
/// dropped, with the store and its markers left as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// The line does not exist in the target document
    #[error("line {line} is out of range (document has {line_count} lines)")]
    OutOfRange { line: usize, line_count: usize },

    /// An event arrived while no document is attached
    #[error("no document attached")]
    NoDocument,

    /// Session configuration could not be read
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
