use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Member;

/// A batch of concrete cylinders poured together.
///
/// Geometry is in centimetres. `design_resistance` is the target strength
/// in psi (stored in the `classification` column).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Family {
    pub id: i64,
    pub family_type: String,
    pub date_of_entry: NaiveDate,
    pub radius: f64,
    pub height: f64,
    pub design_resistance: f64,
    pub client_id: i64,
    pub project_id: i64,
    pub sample_place: String,
    /// Ordered by member id.
    #[serde(default)]
    pub members: Vec<Member>,
}

/// Insert payload for a family.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NewFamily {
    pub family_type: String,
    pub date_of_entry: NaiveDate,
    pub radius: f64,
    pub height: f64,
    pub design_resistance: f64,
    pub client_id: i64,
    pub project_id: i64,
    #[serde(default)]
    pub sample_place: String,
}
