use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The person who performed a specimen's break test (a row of `users`).
///
/// Credential material is never loaded into this struct.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Operative {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
}

impl Operative {
    /// `"First Last"`, as printed on reports.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Insert payload for an operative.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewOperative {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    /// Password hash; stored, never read back by the core.
    pub password_hash: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}
