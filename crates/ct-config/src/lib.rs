//! # ct-config
//!
//! Layered configuration loading for ConcreTrack using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CONCRETRACK_*` prefix, `__` as separator)
//! 2. Project-level `.concretrack/config.toml`
//! 3. User-level `~/.config/concretrack/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CONCRETRACK_DATABASE__PATH` -> `database.path`,
//! `CONCRETRACK_COMPANY__PHONE` -> `company.phone`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ct_config::ConcreteConfig;
//!
//! let config = ConcreteConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod company;
mod database;
mod error;
mod page;
mod report;

pub use company::CompanyConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use page::{Orientation, PageConfig};
pub use report::ReportConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConcreteConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub company: CompanyConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub page: PageConfig,
}

impl ConcreteConfig {
    /// Merge defaults, both config files and the environment, then validate.
    ///
    /// A `.env` file is ignored here; see [`Self::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// The provider chain behind [`Self::load`], exposed for tests.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".concretrack/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Environment wins over both files.
        figment.merge(Env::prefixed("CONCRETRACK_").split("__"))
    }

    /// Reject values the loader and renderer cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.report.renderer_binary.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.renderer_binary".into(),
                reason: "must name an executable".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("concretrack").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ConcreteConfig::default();
        config.validate().unwrap();
        assert_eq!(config.report.renderer_binary, "wkhtmltopdf");
        assert_eq!(config.report.location_label, "Lugar de toma");
        assert!(config.report.template_path.is_none());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut config = ConcreteConfig::default();
        config.database.page_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("database.page_size"));
    }

    #[test]
    fn blank_renderer_is_rejected() {
        let mut config = ConcreteConfig::default();
        config.report.renderer_binary = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
