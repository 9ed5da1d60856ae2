//! Family repository: insert and row parsing.

use ct_core::entities::{Family, NewFamily};
use ct_core::ids::ensure_positive;

use crate::batch::{Batched, FromRow};
use crate::error::DatabaseError;
use crate::helpers::{format_date, get_opt_string, parse_date};
use crate::repos::returned_id;
use crate::service::ConcreteService;

impl FromRow for Family {
    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            family_type: row.get(1)?,
            date_of_entry: parse_date(&row.get::<String>(2)?)?,
            radius: row.get(3)?,
            height: row.get(4)?,
            design_resistance: row.get(5)?,
            client_id: row.get(6)?,
            project_id: row.get(7)?,
            sample_place: get_opt_string(row, 8)?.unwrap_or_default(),
            members: Vec::new(),
        })
    }
}

impl Batched for Family {
    const SELECT: &'static str = "SELECT id, type, date_of_entry, radius, height, classification, \
         client_id, project_id, sample_place FROM families";
}

impl ConcreteService {
    pub async fn save_family(&self, new: &NewFamily) -> Result<Family, DatabaseError> {
        ensure_positive("client", new.client_id)?;
        ensure_positive("project", new.project_id)?;
        if new.radius <= 0.0 || new.height <= 0.0 {
            return Err(DatabaseError::InvalidArgument(format!(
                "family geometry must be positive, got radius={} height={}",
                new.radius, new.height
            )));
        }
        if !new.design_resistance.is_finite() || new.design_resistance <= 0.0 {
            return Err(DatabaseError::InvalidArgument(format!(
                "design resistance must be a positive psi value, got {}",
                new.design_resistance
            )));
        }

        let conn = self.db().connect().await?;
        let rows = conn
            .query(
                "INSERT INTO families (type, date_of_entry, radius, height, classification,
                                       client_id, project_id, sample_place)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
                libsql::params![
                    new.family_type.as_str(),
                    format_date(new.date_of_entry),
                    new.radius,
                    new.height,
                    new.design_resistance,
                    new.client_id,
                    new.project_id,
                    new.sample_place.as_str()
                ],
            )
            .await?;
        let id = returned_id(rows).await?;
        tracing::debug!(family_id = id, project_id = new.project_id, "family saved");

        Ok(Family {
            id,
            family_type: new.family_type.clone(),
            date_of_entry: new.date_of_entry,
            radius: new.radius,
            height: new.height,
            design_resistance: new.design_resistance,
            client_id: new.client_id,
            project_id: new.project_id,
            sample_place: new.sample_place.clone(),
            members: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use ct_core::errors::ErrorKind;

    use rstest::rstest;

    use crate::test_support::helpers::{TestDb, new_family};

    #[tokio::test]
    async fn save_family_returns_generated_id() {
        let test_db = TestDb::new().await;
        let svc = test_db.service();
        let client = svc.save_client("c").await.unwrap();
        let project = test_db.seed_project(client.id, "p").await;

        let family = svc
            .save_family(&new_family(client.id, project))
            .await
            .unwrap();
        assert!(family.id >= 1);
        assert!(family.members.is_empty());
    }

    #[tokio::test]
    async fn save_family_rejects_flat_geometry() {
        let test_db = TestDb::new().await;
        let mut new = new_family(1, 1);
        new.radius = 0.0;
        let err = test_db.service().save_family(&new).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-3000.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[tokio::test]
    async fn save_family_rejects_unusable_design_resistance(#[case] design: f64) {
        let test_db = TestDb::new().await;
        let svc = test_db.service();
        let client = svc.save_client("c").await.unwrap();
        let project = test_db.seed_project(client.id, "p").await;
        let mut new = new_family(client.id, project);
        new.design_resistance = design;

        let err = svc.save_family(&new).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("design resistance"));
    }

    #[tokio::test]
    async fn save_family_for_missing_project_fails() {
        let test_db = TestDb::new().await;
        let svc = test_db.service();
        let client = svc.save_client("c").await.unwrap();
        let err = svc.save_family(&new_family(client.id, 77)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }
}
