use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Operative;

/// One physical test specimen within a family.
///
/// Every measurement is optional: a specimen that has not been broken yet
/// has no result, dates, or fracture mode. Absence is never read as zero.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Member {
    pub id: i64,
    pub family_id: i64,
    /// Measured break load in kN.
    pub result: Option<f64>,
    /// Scheduled fracture date; the entry date is derived from it.
    pub date_of_fracture: Option<NaiveDate>,
    /// When the break test was actually performed.
    pub fractured_at: Option<DateTime<Utc>>,
    pub is_reported: Option<bool>,
    /// Specimen age in days at fracture.
    pub fracture_days: Option<i64>,
    pub operative_id: Option<i64>,
    /// Fracture-mode classification (failure shape).
    pub fracture_type: Option<String>,
    /// Resolved from `operative_id`; `None` when unset or unresolvable.
    #[serde(default)]
    pub operative: Option<Operative>,
}

impl Member {
    /// Whether the member is flagged for inclusion in reports.
    #[must_use]
    pub fn reported(&self) -> bool {
        self.is_reported == Some(true)
    }

    /// The operative id worth resolving: set and non-zero.
    #[must_use]
    pub fn operative_key(&self) -> Option<i64> {
        self.operative_id.filter(|id| *id != 0)
    }
}

/// Insert payload for a member. Used in batches by `save_members`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NewMember {
    pub family_id: i64,
    #[serde(default)]
    pub result: Option<f64>,
    #[serde(default)]
    pub date_of_fracture: Option<NaiveDate>,
    #[serde(default)]
    pub fractured_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_reported: Option<bool>,
    #[serde(default)]
    pub fracture_days: Option<i64>,
    #[serde(default)]
    pub operative_id: Option<i64>,
    #[serde(default)]
    pub fracture_type: Option<String>,
}
