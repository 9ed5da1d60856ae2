//! Repository modules: row parsing and save operations for every entity.
//!
//! Each module implements `FromRow`/`Batched` for its entity and adds
//! methods to `ConcreteService` via `impl ConcreteService` blocks.

pub mod client;
pub mod family;
pub mod member;
pub mod operative;
pub mod project;

use crate::error::DatabaseError;

/// Read the id produced by an `INSERT .. RETURNING id`.
pub(crate) async fn returned_id(mut rows: libsql::Rows) -> Result<i64, DatabaseError> {
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<i64>(0)?)
}
