//! Aggregate loading: project → client, project → families → members → operative.
//!
//! Every selector (by id, by page, by client) loads its root `projects` rows
//! with one query and hands them to [`ConcreteService::assemble`], which
//! resolves the rest of the graph with at most one batched query per entity
//! type:
//!
//! ```text
//! projects ─┬─ clients   WHERE id IN (..)
//!           └─ families  WHERE project_id IN (..)
//!                └─ members   WHERE family_id IN (..)
//!                     └─ users     WHERE id IN (..)
//! ```
//!
//! So a load issues at most 5 statements regardless of fan-out. Any failed
//! step aborts the whole load; partial aggregates are never returned.

use std::collections::HashMap;

use ct_core::entities::{Client, Family, Member, Operative, Project};
use ct_core::ids::{ensure_page, ensure_positive};

use crate::DbConn;
use crate::batch::{Batched, distinct_keys, fetch_all, fetch_optional, group_by, index_by, load_in};
use crate::error::DatabaseError;
use crate::repos::project::ProjectRow;
use crate::service::ConcreteService;

impl ConcreteService {
    /// Load one project with its client, families, members and operatives.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for `id < 1`, `NotFound` when no project has this id,
    /// or any storage error from the batched queries.
    pub async fn get_project_by_id(&self, id: i64) -> Result<Project, DatabaseError> {
        ensure_positive("project", id)?;
        let conn = self.db().connect().await?;

        let root: Option<ProjectRow> = fetch_optional(
            &conn,
            &format!("{} WHERE id = ?1", ProjectRow::SELECT),
            [id],
        )
        .await?;
        let Some(root) = root else {
            tracing::debug!(project_id = id, "project not found");
            return Err(DatabaseError::not_found("project", id));
        };

        let mut projects = self.assemble(&conn, vec![root]).await?;
        projects.pop().ok_or(DatabaseError::NoResult)
    }

    /// Load one page of projects ordered by id. Pages are 1-based.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for `page < 1`, or any storage error.
    pub async fn get_projects(&self, page: i64) -> Result<Vec<Project>, DatabaseError> {
        ensure_page(page)?;
        let limit = i64::from(self.page_size());
        let offset = (page - 1).saturating_mul(limit);
        tracing::debug!(page, limit, offset, "loading project page");

        let conn = self.db().connect().await?;
        let roots: Vec<ProjectRow> = fetch_all(
            &conn,
            &format!("{} ORDER BY id LIMIT ?1 OFFSET ?2", ProjectRow::SELECT),
            libsql::params![limit, offset],
        )
        .await?;

        self.assemble(&conn, roots).await
    }

    /// Load every project commissioned by a client, ordered by id.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for `client_id < 1`, or any storage error.
    pub async fn get_projects_by_client_id(
        &self,
        client_id: i64,
    ) -> Result<Vec<Project>, DatabaseError> {
        ensure_positive("client", client_id)?;
        let conn = self.db().connect().await?;
        let roots: Vec<ProjectRow> = fetch_all(
            &conn,
            &format!("{} WHERE client_id = ?1 ORDER BY id", ProjectRow::SELECT),
            [client_id],
        )
        .await?;

        self.assemble(&conn, roots).await
    }

    /// Attach clients and families (with members) to root project rows.
    ///
    /// Output order matches `roots`.
    async fn assemble(
        &self,
        conn: &DbConn,
        roots: Vec<ProjectRow>,
    ) -> Result<Vec<Project>, DatabaseError> {
        tracing::debug!(step = "projects", count = roots.len(), "roots loaded");
        if roots.is_empty() {
            return Ok(Vec::new());
        }

        let client_ids = distinct_keys(&roots, |p| Some(p.client_id));
        let clients = index_by(load_in::<Client>(conn, "id", &client_ids).await?, |c| c.id);
        tracing::debug!(step = "clients", count = clients.len(), "clients loaded");

        let project_ids = distinct_keys(&roots, |p| Some(p.id));
        let families: Vec<Family> = load_in(conn, "project_id", &project_ids).await?;
        tracing::debug!(step = "families", count = families.len(), "families loaded");

        let families = if families.is_empty() {
            families
        } else {
            attach_members(conn, families).await?
        };
        let mut families_by_project = group_by(families, |f| f.project_id);

        roots
            .into_iter()
            .map(|row| {
                let client = clients.get(&row.client_id).cloned().ok_or_else(|| {
                    tracing::error!(
                        project_id = row.id,
                        client_id = row.client_id,
                        "project references a missing client"
                    );
                    DatabaseError::not_found("client", row.client_id)
                })?;
                Ok(Project {
                    families: families_by_project.remove(&row.id).unwrap_or_default(),
                    id: row.id,
                    name: row.name,
                    client_id: row.client_id,
                    client,
                })
            })
            .collect()
    }
}

/// Load members for `families` in one query, resolve their operatives in one
/// more, and attach both. Families keep their order; members stay ordered by id.
async fn attach_members(
    conn: &DbConn,
    families: Vec<Family>,
) -> Result<Vec<Family>, DatabaseError> {
    let family_ids = distinct_keys(&families, |f| Some(f.id));
    let members: Vec<Member> = load_in(conn, "family_id", &family_ids).await?;
    tracing::debug!(step = "members", count = members.len(), "members loaded");

    let operatives = load_operatives(conn, &members).await?;
    let members = members
        .into_iter()
        .map(|mut member| {
            if let Some(operative_id) = member.operative_key() {
                member.operative = operatives.get(&operative_id).cloned();
                if member.operative.is_none() {
                    tracing::warn!(
                        member_id = member.id,
                        operative_id,
                        "operative not found; attaching member without one"
                    );
                }
            }
            member
        })
        .collect();

    let mut members_by_family = group_by(members, |m| m.family_id);
    let families = families
        .into_iter()
        .map(|mut family| {
            family.members = members_by_family.remove(&family.id).unwrap_or_default();
            family
        })
        .collect();
    Ok(families)
}

/// Resolve distinct non-zero operative ids; issues no query when there are none.
async fn load_operatives(
    conn: &DbConn,
    members: &[Member],
) -> Result<HashMap<i64, Operative>, DatabaseError> {
    let operative_ids = distinct_keys(members, Member::operative_key);
    if operative_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let operatives: Vec<Operative> = load_in(conn, "id", &operative_ids).await?;
    tracing::debug!(
        step = "operatives",
        requested = operative_ids.len(),
        found = operatives.len(),
        "operatives loaded"
    );
    Ok(index_by(operatives, |o| o.id))
}

#[cfg(test)]
mod tests {
    use ct_core::errors::ErrorKind;
    use pretty_assertions::assert_eq;

    use crate::test_support::helpers::{TestDb, broken_member, new_family};

    #[tokio::test]
    async fn missing_project_is_not_found() {
        let test_db = TestDb::new().await;
        let err = test_db.service().get_project_by_id(5).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn missing_project_costs_one_query() {
        let test_db = TestDb::new().await;
        test_db.db().reset_query_count();
        let _ = test_db.service().get_project_by_id(5).await;
        assert_eq!(test_db.db().query_count(), 1);
    }

    #[tokio::test]
    async fn project_without_families_short_circuits() {
        let test_db = TestDb::new().await;
        let svc = test_db.service();
        let client = svc.save_client("c").await.unwrap();
        let project_id = test_db.seed_project(client.id, "bare").await;

        test_db.db().reset_query_count();
        let project = svc.get_project_by_id(project_id).await.unwrap();
        assert!(project.families.is_empty());
        // projects + clients + families
        assert_eq!(test_db.db().query_count(), 3);
    }

    #[tokio::test]
    async fn members_without_operatives_skip_user_query() {
        let test_db = TestDb::new().await;
        let family_id = test_db.seed_family().await;
        let project_id = test_db.project_of(family_id).await;
        let mut member = broken_member(family_id, 250.0, true);
        member.operative_id = Some(0);
        test_db.service().save_members(&[member]).await.unwrap();

        test_db.db().reset_query_count();
        let project = test_db.service().get_project_by_id(project_id).await.unwrap();
        assert_eq!(project.families[0].members.len(), 1);
        assert!(project.families[0].members[0].operative.is_none());
        assert_eq!(test_db.db().query_count(), 4);
    }

    #[tokio::test]
    async fn members_attach_to_their_own_family() {
        let test_db = TestDb::new().await;
        let svc = test_db.service();
        let ours = test_db.seed_family().await;
        let project_id = test_db.project_of(ours).await;
        let theirs = test_db.seed_family().await;
        let client_id = svc.get_project_by_id(project_id).await.unwrap().client_id;
        let sibling = svc
            .save_family(&new_family(client_id, project_id))
            .await
            .unwrap()
            .id;

        svc.save_members(&[
            broken_member(ours, 100.0, true),
            broken_member(theirs, 200.0, true),
            broken_member(sibling, 300.0, true),
            broken_member(ours, 400.0, false),
        ])
        .await
        .unwrap();

        let project = svc.get_project_by_id(project_id).await.unwrap();
        let results: Vec<(i64, Vec<Option<f64>>)> = project
            .families
            .iter()
            .map(|f| (f.id, f.members.iter().map(|m| m.result).collect()))
            .collect();
        assert_eq!(
            results,
            vec![
                (ours, vec![Some(100.0), Some(400.0)]),
                (sibling, vec![Some(300.0)]),
            ]
        );
    }
}
