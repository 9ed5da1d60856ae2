//! Report error types for ct-report.

use ct_core::errors::ErrorKind;
use ct_db::error::DatabaseError;
use thiserror::Error;

/// Errors from the report pipeline.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Loading the project aggregate failed.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// The family is not part of the loaded project.
    #[error("Family {family_id} not found in project {project_id}")]
    FamilyNotFound { project_id: i64, family_id: i64 },

    /// A reported member lacks a measurement the report needs.
    #[error("Member {member_id} is reported but has no {field}")]
    DataIntegrity { member_id: i64, field: &'static str },

    /// A stored family value makes the derived figures meaningless.
    #[error("Family {family_id} has an unusable {field}")]
    FamilyIntegrity { family_id: i64, field: &'static str },

    /// Template rendering or the document renderer failed.
    #[error("Render failed: {0}")]
    Render(String),

    /// Temporary output file handling failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Database(e) => e.kind(),
            Self::FamilyNotFound { .. } => ErrorKind::NotFound,
            Self::DataIntegrity { .. } | Self::FamilyIntegrity { .. } => ErrorKind::DataIntegrity,
            Self::Render(_) => ErrorKind::Render,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<handlebars::RenderError> for ReportError {
    fn from(error: handlebars::RenderError) -> Self {
        Self::Render(format!("template: {error}"))
    }
}

impl From<handlebars::TemplateError> for ReportError {
    fn from(error: handlebars::TemplateError) -> Self {
        Self::Render(format!("template syntax: {error}"))
    }
}
