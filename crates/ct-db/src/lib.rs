//! # ct-db
//!
//! libSQL database operations for ConcreTrack.
//!
//! Handles all relational state: clients, projects, sample families, members
//! and the operatives who break them. Besides plain inserts, this crate owns
//! the aggregate loader that rebuilds project → client, project → families →
//! members → operative graphs with a fixed number of batched queries.
//!
//! Uses the `libsql` crate (C `SQLite` fork) in local mode.

pub mod batch;
pub mod error;
pub mod helpers;
pub mod loader;
mod migrations;
pub mod repos;
pub mod service;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use error::DatabaseError;
use libsql::Builder;
use libsql::params::IntoParams;

/// Central database handle for all ConcreTrack state.
///
/// Wraps a libSQL database that acts as the shared connection pool: every
/// logical request calls [`ConcreteDb::connect`] and works on its own
/// connection, so concurrent requests never share statement or transaction
/// state.
pub struct ConcreteDb {
    db: libsql::Database,
    busy_timeout: Duration,
    queries: Arc<AtomicU64>,
}

impl ConcreteDb {
    /// Open (or create) the database file at `path` and bring its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file cannot be opened or the schema
    /// cannot be applied.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open_local_with_timeout(path, Duration::from_secs(5)).await
    }

    /// Like [`Self::open_local`], with the busy timeout every connection gets.
    ///
    /// # Errors
    ///
    /// See [`Self::open_local`].
    pub async fn open_local_with_timeout(
        path: &str,
        busy_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let concrete_db = Self {
            db,
            busy_timeout,
            queries: Arc::new(AtomicU64::new(0)),
        };
        concrete_db.run_migrations().await?;
        concrete_db.reset_query_count();
        tracing::debug!(path, "database opened");
        Ok(concrete_db)
    }

    /// Open a fresh connection for one logical request.
    ///
    /// Foreign keys and the busy timeout are per-connection settings in
    /// `SQLite`, so they are applied here every time.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be opened or configured.
    pub async fn connect(&self) -> Result<DbConn, DatabaseError> {
        let conn = self.db.connect()?;
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Query(format!("PRAGMA foreign_keys: {e}")))?;
        // busy_timeout echoes the new value back as a row.
        conn.query(
            &format!("PRAGMA busy_timeout = {}", self.busy_timeout.as_millis()),
            (),
        )
        .await
        .map_err(|e| DatabaseError::Query(format!("PRAGMA busy_timeout: {e}")))?;
        Ok(DbConn {
            conn,
            queries: Arc::clone(&self.queries),
        })
    }

    /// Number of statements issued through [`DbConn`] or [`DbTx`] since
    /// open (or the last reset). `BEGIN`, `COMMIT` and `ROLLBACK` are not
    /// counted, nor is anything run through [`DbConn::raw`].
    #[must_use]
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }

    pub fn reset_query_count(&self) {
        self.queries.store(0, Ordering::Relaxed);
    }
}

/// A single request-scoped connection.
///
/// Statements issued through it are counted on the owning [`ConcreteDb`].
pub struct DbConn {
    conn: libsql::Connection,
    queries: Arc<AtomicU64>,
}

impl DbConn {
    /// Run a statement that returns rows.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the statement fails.
    pub async fn query(
        &self,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<libsql::Rows, DatabaseError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        Ok(self.conn.query(sql, params).await?)
    }

    /// Run a statement that returns no rows.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the statement fails.
    pub async fn execute(&self, sql: &str, params: impl IntoParams) -> Result<u64, DatabaseError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        Ok(self.conn.execute(sql, params).await?)
    }

    /// Begin a deferred transaction on this connection.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if `BEGIN` fails.
    pub async fn transaction(&self) -> Result<DbTx, DatabaseError> {
        Ok(DbTx {
            tx: self.conn.transaction().await?,
            queries: Arc::clone(&self.queries),
        })
    }

    /// Access the underlying libSQL connection for uncounted statements.
    #[must_use]
    pub const fn raw(&self) -> &libsql::Connection {
        &self.conn
    }
}

/// An open transaction whose statements count like those of [`DbConn`].
///
/// Dropping it without [`DbTx::commit`] rolls back.
pub struct DbTx {
    tx: libsql::Transaction,
    queries: Arc<AtomicU64>,
}

impl DbTx {
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the statement fails.
    pub async fn query(
        &self,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<libsql::Rows, DatabaseError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        Ok(self.tx.query(sql, params).await?)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the statement fails.
    pub async fn execute(&self, sql: &str, params: impl IntoParams) -> Result<u64, DatabaseError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        Ok(self.tx.execute(sql, params).await?)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if `COMMIT` fails.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        Ok(self.tx.commit().await?)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if `ROLLBACK` fails.
    pub async fn rollback(self) -> Result<(), DatabaseError> {
        Ok(self.tx.rollback().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::TestDb;

    #[tokio::test]
    async fn open_local_creates_schema() {
        let test_db = TestDb::new().await;
        let conn = test_db.db().connect().await.unwrap();

        for table in ["clients", "users", "projects", "families", "members"] {
            let mut rows = conn
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let test_db = TestDb::new().await;
        test_db.db().run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_enforced_per_connection() {
        let test_db = TestDb::new().await;
        let conn = test_db.db().connect().await.unwrap();
        let result = conn
            .execute(
                "INSERT INTO projects (name, client_id) VALUES ('orphan', 999)",
                (),
            )
            .await;
        assert!(result.is_err(), "dangling client_id should be rejected");
    }

    #[tokio::test]
    async fn statements_are_counted() {
        let test_db = TestDb::new().await;
        let db = test_db.db();
        db.reset_query_count();

        let conn = db.connect().await.unwrap();
        conn.execute("INSERT INTO clients (name) VALUES ('a')", ())
            .await
            .unwrap();
        conn.query("SELECT id FROM clients", ()).await.unwrap();
        assert_eq!(db.query_count(), 2);

        db.reset_query_count();
        assert_eq!(db.query_count(), 0);
    }

    #[tokio::test]
    async fn transactional_statements_are_counted() {
        let test_db = TestDb::new().await;
        let db = test_db.db();
        let conn = db.connect().await.unwrap();
        db.reset_query_count();

        let tx = conn.transaction().await.unwrap();
        tx.execute("INSERT INTO clients (name) VALUES ('a')", ())
            .await
            .unwrap();
        tx.query("SELECT id FROM clients", ()).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(db.query_count(), 2);
    }

    #[tokio::test]
    async fn connections_are_independent() {
        let test_db = TestDb::new().await;
        let a = test_db.db().connect().await.unwrap();
        let b = test_db.db().connect().await.unwrap();

        let tx = a.transaction().await.unwrap();
        tx.execute("INSERT INTO clients (name) VALUES ('pending')", ())
            .await
            .unwrap();

        // Uncommitted on `a`, so invisible on `b`.
        let mut rows = b
            .query("SELECT COUNT(*) FROM clients", ())
            .await
            .unwrap();
        let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(count, 0);

        tx.rollback().await.unwrap();
    }
}
