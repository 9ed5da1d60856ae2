//! Member repository: transactional batch insert and row parsing.

use ct_core::entities::{Member, NewMember};
use ct_core::ids::ensure_positive;

use crate::DbTx;
use crate::batch::{Batched, FromRow};
use crate::error::DatabaseError;
use crate::helpers::{
    format_date, get_opt_bool, get_opt_string, parse_optional_date, parse_optional_datetime,
};
use crate::repos::returned_id;
use crate::service::ConcreteService;

const INSERT_MEMBER: &str = "INSERT INTO members (family_id, result, date_of_fracture, fractured_at,
                                         is_reported, fracture_days, operative, fracture_type)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id";

impl FromRow for Member {
    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        let date_of_fracture = get_opt_string(row, 3)?;
        let fractured_at = get_opt_string(row, 4)?;
        Ok(Self {
            id: row.get(0)?,
            family_id: row.get(1)?,
            result: row.get::<Option<f64>>(2)?,
            date_of_fracture: parse_optional_date(date_of_fracture.as_deref())?,
            fractured_at: parse_optional_datetime(fractured_at.as_deref())?,
            is_reported: get_opt_bool(row, 5)?,
            fracture_days: row.get::<Option<i64>>(6)?,
            operative_id: row.get::<Option<i64>>(7)?,
            fracture_type: get_opt_string(row, 8)?,
            operative: None,
        })
    }
}

impl Batched for Member {
    const SELECT: &'static str = "SELECT id, family_id, result, date_of_fracture, fractured_at, \
         is_reported, fracture_days, operative, fracture_type FROM members";
}

fn saved_member(id: i64, new: &NewMember) -> Member {
    Member {
        id,
        family_id: new.family_id,
        result: new.result,
        date_of_fracture: new.date_of_fracture,
        fractured_at: new.fractured_at,
        is_reported: new.is_reported,
        fracture_days: new.fracture_days,
        operative_id: new.operative_id,
        fracture_type: new.fracture_type.clone(),
        operative: None,
    }
}

impl ConcreteService {
    /// Insert a batch of members atomically.
    ///
    /// Either every row is committed or none is: the first failing insert
    /// rolls the transaction back and its error is returned. Members come back
    /// in input order with their generated ids.
    pub async fn save_members(&self, members: &[NewMember]) -> Result<Vec<Member>, DatabaseError> {
        if members.is_empty() {
            return Ok(Vec::new());
        }
        for new in members {
            ensure_positive("family", new.family_id)?;
        }

        let conn = self.db().connect().await?;
        let tx = conn.transaction().await?;
        let mut saved = Vec::with_capacity(members.len());

        for (position, new) in members.iter().enumerate() {
            match insert_member(&tx, new).await {
                Ok(id) => saved.push(saved_member(id, new)),
                Err(error) => {
                    tracing::warn!(
                        position,
                        family_id = new.family_id,
                        %error,
                        "member insert failed; rolling back batch"
                    );
                    if let Err(rollback_error) = tx.rollback().await {
                        tracing::error!(%rollback_error, "rollback failed");
                    }
                    return Err(error);
                }
            }
        }

        tx.commit().await?;
        tracing::debug!(count = saved.len(), "members saved");
        Ok(saved)
    }
}

async fn insert_member(tx: &DbTx, new: &NewMember) -> Result<i64, DatabaseError> {
    let rows = tx
        .query(
            INSERT_MEMBER,
            libsql::params![
                new.family_id,
                new.result,
                new.date_of_fracture.map(format_date),
                new.fractured_at.map(|dt| dt.to_rfc3339()),
                new.is_reported,
                new.fracture_days,
                new.operative_id,
                new.fracture_type.as_deref()
            ],
        )
        .await?;
    returned_id(rows).await
}
