use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Client, Family};

/// A construction project, loaded as a full aggregate (client + families).
///
/// A project is never materialized without its client: the loader fails
/// instead of substituting an empty client.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub client_id: i64,
    pub client: Client,
    #[serde(default)]
    pub families: Vec<Family>,
}

impl Project {
    /// Find one of the loaded families by id.
    #[must_use]
    pub fn family(&self, family_id: i64) -> Option<&Family> {
        self.families.iter().find(|family| family.id == family_id)
    }
}

/// Insert payload for a project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub client_id: i64,
}
