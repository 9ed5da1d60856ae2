//! # ct-report
//!
//! Compressive-strength reports for one sample family of a project.
//!
//! The pipeline loads the project aggregate, derives one row per reported
//! member ([`derive`]), draws the results chart ([`chart`]), renders the
//! presentation model through a handlebars template ([`template`]) and turns
//! the HTML into a PDF through a [`renderer::DocumentRenderer`].
//! [`compositor::ReportService`] ties the steps together.

pub mod chart;
pub mod compositor;
pub mod derive;
pub mod error;
pub mod model;
pub mod renderer;
pub mod template;

pub use compositor::{PDF_CONTENT_TYPE, Report, ReportService};
pub use error::ReportError;
