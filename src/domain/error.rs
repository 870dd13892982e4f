//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Failures of parsing or of a structural edit.
///
/// Benign outcomes (no matching word, unknown label) are not errors; the
/// mutators report them as a count of zero.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("malformed markup at line {line}: {reason}")]
    MalformedMarkup { line: usize, reason: String },

    #[error("document shape not as expected: {0}")]
    StructuralPrecondition(String),

    #[error("document nests {depth} levels deep, the tree view renders at most {max}")]
    TooDeep { depth: usize, max: usize },

    #[error("cannot remove the root element: {0}")]
    RootRemoval(String),

    #[error("failed to read markup: {0}")]
    Io(#[from] std::io::Error),
}

impl DomainError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedMarkup {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
