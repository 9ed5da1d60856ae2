//! Operative (user) repository.
//!
//! The aggregate loader only reads display fields; credentials are written
//! on insert and never selected.

use ct_core::entities::{NewOperative, Operative};

use crate::batch::{Batched, FromRow};
use crate::error::DatabaseError;
use crate::repos::returned_id;
use crate::service::ConcreteService;

impl FromRow for Operative {
    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            role: row.get(3)?,
            is_active: row.get::<i64>(4)? != 0,
        })
    }
}

impl Batched for Operative {
    const SELECT: &'static str = "SELECT id, first_name, last_name, role, is_active FROM users";
}

impl ConcreteService {
    pub async fn save_operative(&self, new: &NewOperative) -> Result<Operative, DatabaseError> {
        let conn = self.db().connect().await?;
        let rows = conn
            .query(
                "INSERT INTO users (username, first_name, last_name, role, password, is_active)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
                libsql::params![
                    new.username.as_str(),
                    new.first_name.as_str(),
                    new.last_name.as_str(),
                    new.role.as_str(),
                    new.password_hash.as_str(),
                    new.is_active
                ],
            )
            .await?;
        let id = returned_id(rows).await?;
        Ok(Operative {
            id,
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            role: new.role.clone(),
            is_active: new.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use ct_core::entities::NewOperative;

    use crate::test_support::helpers::TestDb;

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let test_db = TestDb::new().await;
        let svc = test_db.service();
        let new = NewOperative {
            username: "lpaez".into(),
            first_name: "Luis".into(),
            last_name: "Paez".into(),
            role: "lab".into(),
            password_hash: "$2a$10$hash".into(),
            is_active: true,
        };
        svc.save_operative(&new).await.unwrap();
        assert!(svc.save_operative(&new).await.is_err());
    }
}
