use std::sync::Arc;

use anyhow::Context;
use ct_config::ConcreteConfig;
use ct_db::service::ConcreteService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: Arc<ConcreteService>,
    pub config: ConcreteConfig,
}

impl AppContext {
    /// Load configuration, apply flag overrides and open the database.
    pub async fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let mut config =
            ConcreteConfig::load_with_dotenv().context("failed to load configuration")?;
        if let Some(path) = &flags.db {
            config.database.path = path.to_string_lossy().into_owned();
        }
        tracing::debug!(path = %config.database.path, "opening database");

        let service = ConcreteService::open(&config.database)
            .await
            .with_context(|| format!("failed to open database '{}'", config.database.path))?;

        Ok(Self {
            service: Arc::new(service),
            config,
        })
    }
}
