//! Document template: presentation model → HTML.

use std::path::Path;

use ct_config::ReportConfig;
use handlebars::Handlebars;

use crate::error::ReportError;
use crate::model::ReportModel;

const TEMPLATE_NAME: &str = "report";

/// Template compiled into the binary.
pub const EMBEDDED_TEMPLATE: &str = include_str!("../templates/report.html");

/// A compiled report template.
pub struct ReportTemplate {
    registry: Handlebars<'static>,
}

impl ReportTemplate {
    /// Compile a template from source.
    ///
    /// Strict mode is on, so a reference to a field the model does not have
    /// fails at render time instead of printing nothing.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Render` if the template does not parse.
    pub fn from_source(source: &str) -> Result<Self, ReportError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_template_string(TEMPLATE_NAME, source)?;
        Ok(Self { registry })
    }

    /// The built-in template.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Render` if the embedded template does not parse.
    pub fn embedded() -> Result<Self, ReportError> {
        Self::from_source(EMBEDDED_TEMPLATE)
    }

    /// # Errors
    ///
    /// Returns `ReportError::Io` if the file cannot be read, or
    /// `ReportError::Render` if it does not parse.
    pub fn from_file(path: &Path) -> Result<Self, ReportError> {
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded report template");
        Self::from_source(&source)
    }

    /// The configured override, or the built-in template.
    ///
    /// # Errors
    ///
    /// See [`Self::from_file`] and [`Self::embedded`].
    pub fn from_config(config: &ReportConfig) -> Result<Self, ReportError> {
        match &config.template_path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    /// # Errors
    ///
    /// Returns `ReportError::Render` carrying the handlebars error.
    pub fn render(&self, model: &ReportModel) -> Result<String, ReportError> {
        Ok(self.registry.render(TEMPLATE_NAME, model)?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ct_config::CompanyConfig;
    use ct_core::entities::{Client, Family, Project};
    use ct_core::errors::ErrorKind;

    use super::*;
    use crate::derive::derive_rows;

    fn project() -> Project {
        let family = Family {
            id: 7,
            family_type: "cylinder".into(),
            date_of_entry: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            radius: 7.5,
            height: 30.0,
            design_resistance: 3000.0,
            client_id: 1,
            project_id: 2,
            sample_place: "Losa <norte>".into(),
            members: Vec::new(),
        };
        Project {
            id: 2,
            name: "Torre Mirador".into(),
            client_id: 1,
            client: Client {
                id: 1,
                name: "Constructora Andina".into(),
            },
            families: vec![family],
        }
    }

    fn model(chart: Option<String>) -> ReportModel {
        let project = project();
        let family = &project.families[0];
        ReportModel::new(
            &CompanyConfig::default(),
            &project,
            family,
            derive_rows(family).unwrap(),
            chart,
            NaiveDate::from_ymd_opt(2026, 4, 2)
                .unwrap()
                .and_hms_opt(14, 5, 9)
                .unwrap(),
        )
    }

    #[test]
    fn embedded_template_renders_header_fields() {
        let html = ReportTemplate::embedded().unwrap().render(&model(None)).unwrap();
        assert!(html.contains("Ingenieros AJV"));
        assert!(html.contains("Constructora Andina"));
        assert!(html.contains("Torre Mirador"));
        assert!(html.contains("2026-04-02 14:05:09"));
        assert!(html.contains("Sin muestras reportadas."));
        assert!(!html.contains("data:image/png"));
    }

    #[test]
    fn model_text_is_escaped() {
        let html = ReportTemplate::embedded().unwrap().render(&model(None)).unwrap();
        assert!(html.contains("Losa &lt;norte&gt;"));
    }

    #[test]
    fn chart_is_embedded_as_data_uri() {
        let html = ReportTemplate::embedded()
            .unwrap()
            .render(&model(Some("iVBORw0KGgo=".into())))
            .unwrap();
        assert!(html.contains("data:image/png;base64,iVBORw0KGgo="));
    }

    #[test]
    fn unknown_field_fails_in_strict_mode() {
        let template = ReportTemplate::from_source("{{project.budget}}").unwrap();
        let err = template.render(&model(None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Render);
    }

    #[test]
    fn broken_syntax_is_a_render_error() {
        let err = ReportTemplate::from_source("{{#if members}}").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Render);
    }

    #[test]
    fn template_override_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.html");
        std::fs::write(&path, "<p>{{client.name}}</p>").unwrap();

        let config = ReportConfig {
            template_path: Some(path),
            ..ReportConfig::default()
        };
        let html = ReportTemplate::from_config(&config)
            .unwrap()
            .render(&model(None))
            .unwrap();
        assert_eq!(html, "<p>Constructora Andina</p>");
    }

    #[test]
    fn missing_override_is_io_error() {
        let config = ReportConfig {
            template_path: Some("/nonexistent/report.html".into()),
            ..ReportConfig::default()
        };
        let err = ReportTemplate::from_config(&config).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
