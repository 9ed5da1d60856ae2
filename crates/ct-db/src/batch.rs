//! Generic batch loading: collect keys, one fetch per entity type, index, attach.
//!
//! Resolving a one-to-many relation for many parents costs one
//! `WHERE col IN (...)` query instead of one query per parent. The routines
//! here are parameterized by entity type ([`Batched`]) and key extractor
//! (a closure), so every relation in the aggregate loader goes through the
//! same code path.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use crate::DbConn;
use crate::error::DatabaseError;

/// Parse one entity from a result row.
pub trait FromRow: Sized {
    /// # Errors
    ///
    /// Returns `DatabaseError` if a column is missing or malformed.
    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError>;
}

/// An entity that can be fetched in batches by an integer column.
pub trait Batched: FromRow {
    /// `SELECT <cols> FROM <table>` without a `WHERE` clause.
    const SELECT: &'static str;
    /// Ordering applied to every batch, so grouping preserves a stable order.
    const ORDER_BY: &'static str = "id";
}

/// Build `SELECT .. WHERE {key_column} IN (?1, ?2, ..) ORDER BY ..`.
fn in_clause_sql<T: Batched>(key_column: &str, key_count: usize) -> String {
    let placeholders = (1..=key_count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} WHERE {key_column} IN ({placeholders}) ORDER BY {}",
        T::SELECT,
        T::ORDER_BY
    )
}

/// Fetch every `T` whose `key_column` is one of `keys`, in a single query.
///
/// An empty key set issues no query at all.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails or a row cannot be parsed.
pub async fn load_in<T: Batched>(
    conn: &DbConn,
    key_column: &str,
    keys: &[i64],
) -> Result<Vec<T>, DatabaseError> {
    if keys.is_empty() {
        return Ok(Vec::new());
    }
    let sql = in_clause_sql::<T>(key_column, keys.len());
    let params = keys.iter().copied().map(libsql::Value::Integer);
    let rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
    collect_rows(rows).await
}

/// Fetch all rows of an arbitrary query.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails or a row cannot be parsed.
pub async fn fetch_all<T: FromRow>(
    conn: &DbConn,
    sql: &str,
    params: impl libsql::params::IntoParams,
) -> Result<Vec<T>, DatabaseError> {
    let rows = conn.query(sql, params).await?;
    collect_rows(rows).await
}

/// Fetch at most one row.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails or the row cannot be parsed.
pub async fn fetch_optional<T: FromRow>(
    conn: &DbConn,
    sql: &str,
    params: impl libsql::params::IntoParams,
) -> Result<Option<T>, DatabaseError> {
    let mut rows = conn.query(sql, params).await?;
    match rows.next().await? {
        Some(row) => Ok(Some(T::from_row(&row)?)),
        None => Ok(None),
    }
}

async fn collect_rows<T: FromRow>(mut rows: libsql::Rows) -> Result<Vec<T>, DatabaseError> {
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(T::from_row(&row)?);
    }
    Ok(results)
}

/// Distinct keys in ascending order. `None` keys are skipped.
pub fn distinct_keys<T, F>(items: &[T], key: F) -> Vec<i64>
where
    F: Fn(&T) -> Option<i64>,
{
    items
        .iter()
        .filter_map(key)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Index items by a unique key. Later duplicates replace earlier ones.
pub fn index_by<T, K, F>(items: Vec<T>, key: F) -> HashMap<K, T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    items.into_iter().map(|item| (key(&item), item)).collect()
}

/// Group items by a parent key, preserving input order within each group.
pub fn group_by<T, K, F>(items: Vec<T>, key: F) -> HashMap<K, Vec<T>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut groups: HashMap<K, Vec<T>> = HashMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        id: i64,
        parent: i64,
        link: Option<i64>,
    }

    impl FromRow for Row {
        fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
            Ok(Self {
                id: row.get(0)?,
                parent: row.get(1)?,
                link: row.get(2)?,
            })
        }
    }

    impl Batched for Row {
        const SELECT: &'static str = "SELECT id, parent, link FROM rows";
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, parent: 10, link: Some(7) },
            Row { id: 2, parent: 20, link: None },
            Row { id: 3, parent: 10, link: Some(7) },
            Row { id: 4, parent: 30, link: Some(0) },
        ]
    }

    #[test]
    fn in_clause_numbers_placeholders() {
        assert_eq!(
            in_clause_sql::<Row>("parent", 3),
            "SELECT id, parent, link FROM rows WHERE parent IN (?1, ?2, ?3) ORDER BY id"
        );
    }

    #[test]
    fn distinct_keys_dedupes_and_sorts() {
        let mut items = rows();
        items.reverse();
        assert_eq!(distinct_keys(&items, |r| Some(r.parent)), vec![10, 20, 30]);
        assert_eq!(distinct_keys(&items, |r| r.link), vec![0, 7]);
    }

    #[test]
    fn group_by_preserves_order_within_group() {
        let groups = group_by(rows(), |r| r.parent);
        let ids: Vec<i64> = groups[&10].iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(groups[&20].len(), 1);
        assert!(!groups.contains_key(&40));
    }

    #[test]
    fn index_by_keys_each_item() {
        let index = index_by(rows(), |r| r.id);
        assert_eq!(index.len(), 4);
        assert_eq!(index[&4].parent, 30);
    }

    #[tokio::test]
    async fn load_in_skips_query_for_empty_keys() {
        let test_db = crate::test_support::helpers::TestDb::new().await;
        let conn = test_db.db().connect().await.unwrap();
        test_db.db().reset_query_count();

        let loaded: Vec<Row> = load_in(&conn, "parent", &[]).await.unwrap();
        assert!(loaded.is_empty());
        assert_eq!(test_db.db().query_count(), 0);
    }

    #[tokio::test]
    async fn load_in_fetches_matching_rows_in_one_query() {
        let test_db = crate::test_support::helpers::TestDb::new().await;
        let conn = test_db.db().connect().await.unwrap();
        conn.raw()
            .execute_batch(
                "CREATE TABLE rows (id INTEGER PRIMARY KEY, parent INTEGER, link INTEGER);
                 INSERT INTO rows VALUES (1, 10, 7), (2, 20, NULL), (3, 10, 7), (4, 30, 0);",
            )
            .await
            .unwrap();
        test_db.db().reset_query_count();

        let loaded: Vec<Row> = load_in(&conn, "parent", &[10, 30]).await.unwrap();
        let ids: Vec<i64> = loaded.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(test_db.db().query_count(), 1);
    }
}
