//! Shared test utilities for ct-db and downstream crate tests.
//!
//! Enabled for this crate's own tests and, through the `test-support`
//! feature, for other workspace crates' dev-dependencies.

pub mod helpers {
    use std::sync::Arc;

    use chrono::{NaiveDate, TimeZone, Utc};
    use ct_core::entities::{NewFamily, NewMember, NewOperative, NewProject};
    use tempfile::TempDir;

    use crate::ConcreteDb;
    use crate::service::{ConcreteService, DEFAULT_PAGE_SIZE};

    /// A service over a database file in a private temp directory.
    ///
    /// Each connection opened by the service sees the same file, which an
    /// in-memory database would not give us.
    pub struct TestDb {
        service: Arc<ConcreteService>,
        _dir: TempDir,
    }

    impl TestDb {
        pub async fn new() -> Self {
            Self::with_page_size(DEFAULT_PAGE_SIZE).await
        }

        pub async fn with_page_size(page_size: u32) -> Self {
            let dir = TempDir::new().expect("temp dir");
            let path = dir.path().join("concretrack.db");
            let db = ConcreteDb::open_local(path.to_str().expect("utf-8 path"))
                .await
                .expect("open test database");
            let service = ConcreteService::from_db(db, page_size).expect("service");
            Self {
                service: Arc::new(service),
                _dir: dir,
            }
        }

        pub fn service(&self) -> &ConcreteService {
            &self.service
        }

        /// A shared handle for consumers that hold the service, like the report compositor.
        pub fn shared_service(&self) -> Arc<ConcreteService> {
            Arc::clone(&self.service)
        }

        pub fn db(&self) -> &ConcreteDb {
            self.service.db()
        }

        /// Insert a project row and return its id.
        pub async fn seed_project(&self, client_id: i64, name: &str) -> i64 {
            self.service
                .save_project(&NewProject {
                    name: name.to_string(),
                    client_id,
                })
                .await
                .expect("seed project")
                .id
        }

        /// Insert a client, a project and one family; return the family id.
        pub async fn seed_family(&self) -> i64 {
            let client = self.service.save_client("Seed client").await.expect("client");
            let project_id = self.seed_project(client.id, "Seed project").await;
            self.service
                .save_family(&new_family(client.id, project_id))
                .await
                .expect("seed family")
                .id
        }

        pub async fn seed_operative(&self, username: &str, first: &str, last: &str) -> i64 {
            self.service
                .save_operative(&NewOperative {
                    username: username.to_string(),
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    role: "lab".to_string(),
                    password_hash: "x".to_string(),
                    is_active: true,
                })
                .await
                .expect("seed operative")
                .id
        }

        /// Project id owning `family_id`.
        pub async fn project_of(&self, family_id: i64) -> i64 {
            let conn = self.db().connect().await.expect("connect");
            let mut rows = conn
                .raw()
                .query("SELECT project_id FROM families WHERE id = ?1", [family_id])
                .await
                .expect("query");
            rows.next()
                .await
                .expect("row")
                .expect("family exists")
                .get(0)
                .expect("project_id")
        }
    }

    /// A 15 cm × 30 cm cylinder family designed for 3000 psi.
    pub fn new_family(client_id: i64, project_id: i64) -> NewFamily {
        NewFamily {
            family_type: "cylinder".to_string(),
            date_of_entry: NaiveDate::from_ymd_opt(2026, 3, 1).expect("date"),
            radius: 7.5,
            height: 30.0,
            design_resistance: 3000.0,
            client_id,
            project_id,
            sample_place: "Losa piso 4".to_string(),
        }
    }

    /// A fully measured specimen, broken at 28 days.
    pub fn broken_member(family_id: i64, result: f64, reported: bool) -> NewMember {
        NewMember {
            family_id,
            result: Some(result),
            date_of_fracture: NaiveDate::from_ymd_opt(2026, 3, 29),
            fractured_at: Some(Utc.with_ymd_and_hms(2026, 3, 29, 9, 30, 0).unwrap()),
            is_reported: Some(reported),
            fracture_days: Some(28),
            operative_id: None,
            fracture_type: Some("cone".to_string()),
        }
    }
}
