//! Report generation configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_renderer_binary() -> String {
    "wkhtmltopdf".to_string()
}

fn default_location_label() -> String {
    "Lugar de toma".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Executable used to turn report HTML into PDF.
    #[serde(default = "default_renderer_binary")]
    pub renderer_binary: String,

    /// Fixed sample-location label embedded in report filenames.
    #[serde(default = "default_location_label")]
    pub location_label: String,

    /// Replaces the embedded handlebars template when set.
    #[serde(default)]
    pub template_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            renderer_binary: default_renderer_binary(),
            location_label: default_location_label(),
            template_path: None,
        }
    }
}
