//! Service layer exposing repository and loader operations.
//!
//! `ConcreteService` wraps `ConcreteDb` (raw database access) together with
//! the paging policy. Repository methods are implemented as `impl ConcreteService`
//! blocks in `repos/*` and `loader.rs`. Every public method opens its own
//! connection, so one service can be shared across concurrent requests.

use std::time::Duration;

use ct_config::DatabaseConfig;

use crate::ConcreteDb;
use crate::error::DatabaseError;

/// Default number of projects per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Request-facing facade over the database.
pub struct ConcreteService {
    db: ConcreteDb,
    page_size: u32,
}

impl ConcreteService {
    /// Open the database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidArgument` for a zero page size, or any
    /// error from opening the database.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let db = ConcreteDb::open_local_with_timeout(
            &config.path,
            Duration::from_millis(config.busy_timeout_ms),
        )
        .await?;
        Self::from_db(db, config.page_size)
    }

    /// Wrap an existing `ConcreteDb`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidArgument` if `page_size` is zero.
    pub fn from_db(db: ConcreteDb, page_size: u32) -> Result<Self, DatabaseError> {
        if page_size == 0 {
            return Err(DatabaseError::InvalidArgument(
                "page size must be at least 1".into(),
            ));
        }
        Ok(Self { db, page_size })
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &ConcreteDb {
        &self.db
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }
}
