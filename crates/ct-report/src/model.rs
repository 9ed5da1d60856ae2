//! Presentation model handed to the report template.

use chrono::NaiveDateTime;
use ct_config::CompanyConfig;
use ct_core::entities::{Family, Project};
use serde::Serialize;

use crate::derive::ReportRow;

#[derive(Debug, Clone, Serialize)]
pub struct ReportModel {
    pub company: CompanyView,
    pub client: ClientView,
    pub project: ProjectView,
    pub family: FamilyView,
    pub members: Vec<ReportRow>,
    /// Base64 PNG; `None` renders the report without a chart.
    pub chart_base64: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyView {
    pub name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientView {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub name: String,
    pub report_date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FamilyView {
    pub id: i64,
    /// The sample place doubles as the family's display name.
    pub name: String,
    pub family_type: String,
    pub date_of_entry: String,
    pub design_resistance: String,
}

impl ReportModel {
    #[must_use]
    pub fn new(
        company: &CompanyConfig,
        project: &Project,
        family: &Family,
        members: Vec<ReportRow>,
        chart_base64: Option<String>,
        generated_at: NaiveDateTime,
    ) -> Self {
        Self {
            company: CompanyView {
                name: company.name.clone(),
                address: company.address.clone(),
                phone: company.phone.clone(),
            },
            client: ClientView {
                id: project.client_id,
                name: project.client.name.clone(),
            },
            project: ProjectView {
                name: project.name.clone(),
                report_date: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            },
            family: FamilyView {
                id: family.id,
                name: family.sample_place.clone(),
                family_type: family.family_type.clone(),
                date_of_entry: family.date_of_entry.format("%Y-%m-%d").to_string(),
                design_resistance: format!("{:.2}", family.design_resistance),
            },
            members,
            chart_base64,
        }
    }
}
