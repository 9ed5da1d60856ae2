//! Integer id validation.
//!
//! Storage generates ids with `INTEGER PRIMARY KEY`, so every valid id is >= 1.
//! Callers (CLI, HTTP handlers) pass raw integers; these helpers reject the rest
//! before any query is issued.

use crate::errors::CoreError;

/// Ensure `id` is a positive integer.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` naming the entity when `id < 1`.
pub fn ensure_positive(entity_type: &str, id: i64) -> Result<i64, CoreError> {
    if id < 1 {
        return Err(CoreError::InvalidArgument(format!(
            "{entity_type} id must be greater than zero, got {id}"
        )));
    }
    Ok(id)
}

/// Ensure a 1-based page number is valid.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` when `page < 1`.
pub fn ensure_page(page: i64) -> Result<i64, CoreError> {
    if page < 1 {
        return Err(CoreError::InvalidArgument(format!(
            "page can't be less than one, got {page}"
        )));
    }
    Ok(page)
}
