//! Storage errors and their place in the shared taxonomy.

use ct_core::errors::{CoreError, ErrorKind};
use thiserror::Error;

/// Anything that can go wrong between a repository call and libSQL.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A statement failed or a row did not have the expected shape.
    #[error("query error: {0}")]
    Query(String),

    #[error("schema migration {0}")]
    Migration(String),

    /// An `INSERT .. RETURNING` produced no row.
    #[error("statement returned no row")]
    NoResult,

    /// A root entity, or a mandatory relation of one, does not exist.
    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: String, id: i64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("libsql: {0}")]
    LibSql(#[from] libsql::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity_type: &str, id: i64) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Query(_)
            | Self::Migration(_)
            | Self::NoResult
            | Self::LibSql(_)
            | Self::Other(_) => ErrorKind::Storage,
        }
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            CoreError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            CoreError::Other(e) => Self::Other(e),
        }
    }
}
