//! Embedded schema, applied every time a database is opened.
//!
//! The DDL only creates what is missing, so reapplying it is a no-op.

use crate::ConcreteDb;
use crate::error::DatabaseError;

const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl ConcreteDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        let conn = self.connect().await?;
        conn.raw()
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
