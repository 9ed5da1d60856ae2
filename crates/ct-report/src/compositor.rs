//! Report compositor: project aggregate → derived rows + chart → HTML → PDF.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use ct_config::{CompanyConfig, ConcreteConfig};
use ct_core::ids::ensure_positive;
use ct_db::error::DatabaseError;
use ct_db::service::ConcreteService;
use tracing::{debug, info};

use crate::chart::render_chart;
use crate::derive::derive_rows;
use crate::error::ReportError;
use crate::model::ReportModel;
use crate::renderer::{DocumentRenderer, RenderOptions, WkHtmlToPdf};
use crate::template::ReportTemplate;

/// MIME type of every generated report.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A rendered report ready to hand to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Report {
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        PDF_CONTENT_TYPE
    }

    /// `Content-Disposition` value that downloads the report under its filename.
    #[must_use]
    pub fn content_disposition(&self) -> String {
        format!(
            "attachment; filename=\"{}\"",
            self.filename.replace('\\', "\\\\").replace('"', "\\\"")
        )
    }
}

/// `Reporte {project}-{location label}-{YYYY-MM-DD HH:MM:SS}.pdf`
#[must_use]
pub fn report_filename(project_name: &str, location_label: &str, generated_at: NaiveDateTime) -> String {
    format!(
        "Reporte {project_name}-{location_label}-{}.pdf",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Generates per-family compressive-strength reports.
pub struct ReportService {
    service: Arc<ConcreteService>,
    renderer: Arc<dyn DocumentRenderer>,
    template: ReportTemplate,
    company: CompanyConfig,
    location_label: String,
    options: RenderOptions,
}

impl ReportService {
    #[must_use]
    pub fn new(
        service: Arc<ConcreteService>,
        renderer: Arc<dyn DocumentRenderer>,
        template: ReportTemplate,
        company: CompanyConfig,
        location_label: impl Into<String>,
        options: RenderOptions,
    ) -> Self {
        Self {
            service,
            renderer,
            template,
            company,
            location_label: location_label.into(),
            options,
        }
    }

    /// Wire the compositor from configuration, rendering with `wkhtmltopdf`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if the configured template cannot be loaded.
    pub fn from_config(
        service: Arc<ConcreteService>,
        config: &ConcreteConfig,
    ) -> Result<Self, ReportError> {
        Ok(Self::new(
            service,
            Arc::new(WkHtmlToPdf::new(config.report.renderer_binary.clone())),
            ReportTemplate::from_config(&config.report)?,
            config.company.clone(),
            config.report.location_label.clone(),
            RenderOptions::from(&config.page),
        ))
    }

    /// Generate the report for one family, stamped with the current local time.
    ///
    /// # Errors
    ///
    /// See [`Self::generate_family_report_at`].
    pub async fn generate_family_report(
        &self,
        project_id: i64,
        family_id: i64,
    ) -> Result<Report, ReportError> {
        self.generate_family_report_at(project_id, family_id, Local::now().naive_local())
            .await
    }

    /// Generate the report for one family of a project.
    ///
    /// The renderer writes into a temporary file that is removed before this
    /// returns, whether rendering succeeded or not.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the project does not exist or the family is not part of it
    /// - `InvalidArgument` for non-positive ids
    /// - `DataIntegrity` when a reported member lacks a measurement
    /// - `Render` for template or renderer failures
    /// - `Io` for temporary file failures
    /// - any storage error from loading the project
    pub async fn generate_family_report_at(
        &self,
        project_id: i64,
        family_id: i64,
        generated_at: NaiveDateTime,
    ) -> Result<Report, ReportError> {
        ensure_positive("family", family_id).map_err(DatabaseError::from)?;
        let project = self.service.get_project_by_id(project_id).await?;
        let family = project
            .family(family_id)
            .ok_or(ReportError::FamilyNotFound {
                project_id,
                family_id,
            })?;

        let rows = derive_rows(family)?;
        let chart = render_chart(&family.members, family.design_resistance).await;
        debug!(
            project_id,
            family_id,
            rows = rows.len(),
            has_chart = chart.is_some(),
            "report model built"
        );

        let model = ReportModel::new(&self.company, &project, family, rows, chart, generated_at);
        let html = self.template.render(&model)?;

        let output = tempfile::Builder::new()
            .prefix("reporte-")
            .suffix(".pdf")
            .tempfile()?;
        // On any early return `output` is dropped, which deletes the file.
        self.renderer
            .render(html.as_bytes(), &self.options, output.path())
            .await?;
        let bytes = tokio::fs::read(output.path()).await?;
        output.close()?;

        let filename = report_filename(&project.name, &self.location_label, generated_at);
        info!(project_id, family_id, bytes = bytes.len(), %filename, "report generated");
        Ok(Report { filename, bytes })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 4, 2)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn filename_joins_project_label_and_timestamp() {
        assert_eq!(
            report_filename("Torre Mirador", "Lugar de toma", at(14, 5, 9)),
            "Reporte Torre Mirador-Lugar de toma-2026-04-02 14:05:09.pdf"
        );
    }

    #[test]
    fn content_headers_for_caller() {
        let report = Report {
            filename: "Reporte \"A\"-x-2026.pdf".into(),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(report.content_type(), "application/pdf");
        assert_eq!(
            report.content_disposition(),
            r#"attachment; filename="Reporte \"A\"-x-2026.pdf""#
        );
    }
}
