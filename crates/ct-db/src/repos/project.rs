//! Project repository: the flat `projects` row and project insert.
//!
//! Full project aggregates are assembled in `crate::loader`.

use ct_core::entities::{NewProject, Project};
use ct_core::ids::ensure_positive;

use crate::batch::{Batched, FromRow};
use crate::error::DatabaseError;
use crate::repos::returned_id;
use crate::service::ConcreteService;

/// A `projects` row before its client and families are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
    pub id: i64,
    pub name: String,
    pub client_id: i64,
}

impl FromRow for ProjectRow {
    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            client_id: row.get(2)?,
        })
    }
}

impl Batched for ProjectRow {
    const SELECT: &'static str = "SELECT id, name, client_id FROM projects";
}

impl ConcreteService {
    /// Insert a project and return it as a loaded aggregate.
    pub async fn save_project(&self, new: &NewProject) -> Result<Project, DatabaseError> {
        ensure_positive("client", new.client_id)?;
        let conn = self.db().connect().await?;
        let rows = conn
            .query(
                "INSERT INTO projects (name, client_id) VALUES (?1, ?2) RETURNING id",
                libsql::params![new.name.as_str(), new.client_id],
            )
            .await?;
        let id = returned_id(rows).await?;
        tracing::debug!(project_id = id, client_id = new.client_id, "project saved");
        drop(conn);

        self.get_project_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use ct_core::entities::NewProject;
    use ct_core::errors::ErrorKind;

    use crate::test_support::helpers::TestDb;

    #[tokio::test]
    async fn save_project_returns_aggregate_with_client() {
        let test_db = TestDb::new().await;
        let svc = test_db.service();
        let client = svc.save_client("Constructora Andina").await.unwrap();

        let project = svc
            .save_project(&NewProject {
                name: "Torre Norte".into(),
                client_id: client.id,
            })
            .await
            .unwrap();
        assert_eq!(project.name, "Torre Norte");
        assert_eq!(project.client, client);
        assert!(project.families.is_empty());
    }

    #[tokio::test]
    async fn save_project_for_unknown_client_fails() {
        let test_db = TestDb::new().await;
        let err = test_db
            .service()
            .save_project(&NewProject {
                name: "x".into(),
                client_id: 99,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }
}
