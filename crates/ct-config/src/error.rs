//! Errors raised while loading or validating configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer failed to parse or did not match the expected shape.
    #[error("failed to load ConcreTrack configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("{field} is invalid: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        Self::Load(Box::new(error))
    }
}
