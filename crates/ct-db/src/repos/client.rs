//! Client repository: insert and lookups.

use ct_core::entities::Client;
use ct_core::ids::ensure_positive;

use crate::batch::{Batched, FromRow, fetch_all, fetch_optional};
use crate::error::DatabaseError;
use crate::repos::returned_id;
use crate::service::ConcreteService;

impl FromRow for Client {
    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

impl Batched for Client {
    const SELECT: &'static str = "SELECT id, name FROM clients";
}

impl ConcreteService {
    pub async fn save_client(&self, name: &str) -> Result<Client, DatabaseError> {
        let conn = self.db().connect().await?;
        let rows = conn
            .query("INSERT INTO clients (name) VALUES (?1) RETURNING id", [name])
            .await?;
        let id = returned_id(rows).await?;
        tracing::debug!(client_id = id, "client saved");
        Ok(Client {
            id,
            name: name.to_string(),
        })
    }

    pub async fn get_client(&self, id: i64) -> Result<Client, DatabaseError> {
        ensure_positive("client", id)?;
        let conn = self.db().connect().await?;
        fetch_optional(&conn, &format!("{} WHERE id = ?1", Client::SELECT), [id])
            .await?
            .ok_or_else(|| DatabaseError::not_found("client", id))
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, DatabaseError> {
        let conn = self.db().connect().await?;
        fetch_all(&conn, &format!("{} ORDER BY id", Client::SELECT), ()).await
    }
}
