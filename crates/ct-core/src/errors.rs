//! Cross-cutting error types for ConcreTrack.
//!
//! Domain-specific errors (`DatabaseError`, `ReportError`, `ConfigError`) live in
//! their respective crates. Each of them reports an [`ErrorKind`] so that callers
//! can pick a response (exit code, HTTP status) without matching on every variant.

use std::fmt;

use thiserror::Error;

/// Distinguishable failure categories surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No root entity exists for the given id.
    NotFound,
    /// A caller-supplied argument is out of range (page < 1, id < 1).
    InvalidArgument,
    /// Stored data violates an invariant the report pipeline relies on.
    DataIntegrity,
    /// A query or transaction failed in the storage engine.
    Storage,
    /// Template rendering or the external document renderer failed.
    Render,
    /// Temporary file handling failed.
    Io,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidArgument => "invalid_argument",
            Self::DataIntegrity => "data_integrity",
            Self::Storage => "storage",
            Self::Render => "render",
            Self::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation and lookup failures shared by every ConcreTrack crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: String, id: i64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Other(_) => ErrorKind::Storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_variant() {
        let not_found = CoreError::NotFound {
            entity_type: "project".into(),
            id: 4,
        };
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(not_found.to_string(), "project 4 not found");

        let invalid = CoreError::InvalidArgument("page must be >= 1".into());
        assert_eq!(invalid.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn kind_display_is_snake_case() {
        assert_eq!(ErrorKind::DataIntegrity.to_string(), "data_integrity");
        assert_eq!(ErrorKind::InvalidArgument.to_string(), "invalid_argument");
    }
}
