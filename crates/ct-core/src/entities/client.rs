use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A customer that commissions projects.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Client {
    pub id: i64,
    pub name: String,
}
