//! Storage configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "concretrack.db".to_string()
}

/// Projects per page on the paged listing.
const fn default_page_size() -> u32 {
    20
}

const fn default_busy_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path of the local libSQL database file.
    #[serde(default = "default_path")]
    pub path: String,

    /// Fixed page size for `get_projects(page)`.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// How long a connection waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            page_size: default_page_size(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}
