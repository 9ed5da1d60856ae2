//! Engineering derivation: turn reported members into report rows.
//!
//! Every value is computed at full `f64` precision; the two-decimal strings in
//! [`RowDisplay`] are produced last and never fed back into a computation.

use std::f64::consts::PI;

use chrono::{Days, NaiveDate};
use ct_core::entities::{Family, Member};
use serde::Serialize;

use crate::error::ReportError;

/// Load-to-stress factor applied to `result / area` to get kg/cm².
pub const KG_CM2_FACTOR: f64 = 102.0;
/// kg/cm² per psi.
pub const KG_CM2_PER_PSI: f64 = 0.07;
/// psi per MPa.
pub const PSI_PER_MPA: f64 = 145.0377;
/// Correction factor for a standard 2:1 cylinder.
pub const ADJUSTMENT_FACTOR: u32 = 1;

/// One line of the results table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub member_id: i64,
    pub sample_place: String,
    pub date_of_entry: NaiveDate,
    pub fractured_on: NaiveDate,
    pub age_days: i64,
    pub diameter_cm: f64,
    pub length_cm: f64,
    pub area_cm2: f64,
    pub adjustment_factor: u32,
    pub result: f64,
    pub strength_kg_cm2: f64,
    pub strength_psi: f64,
    pub design_psi: f64,
    pub design_mpa: f64,
    pub obtained_percent: f64,
    pub failure_shape: String,
    /// Empty when the operative is unset or could not be resolved.
    pub operative: String,
    pub display: RowDisplay,
}

/// Two-decimal renderings of the computed columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDisplay {
    pub date_of_entry: String,
    pub fractured_on: String,
    pub diameter_cm: String,
    pub length_cm: String,
    pub area_cm2: String,
    pub strength_kg_cm2: String,
    pub strength_psi: String,
    pub design_psi: String,
    pub design_mpa: String,
    pub obtained_percent: String,
}

/// Cross-section of a cylinder with the given radius, in cm².
#[must_use]
pub fn cross_section_area(radius_cm: f64) -> f64 {
    PI * radius_cm.powi(2)
}

fn ensure_usable(family_id: i64, field: &'static str, value: f64) -> Result<(), ReportError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ReportError::FamilyIntegrity { family_id, field })
    }
}

fn two_decimals(value: f64) -> String {
    format!("{value:.2}")
}

/// Derive one row per reported member of `family`, in member order.
///
/// # Errors
///
/// Returns `ReportError::DataIntegrity` naming the first reported member
/// that is missing a measurement. No defaults are substituted. A family
/// with reported members and a non-positive design resistance or radius is
/// `ReportError::FamilyIntegrity`.
pub fn derive_rows(family: &Family) -> Result<Vec<ReportRow>, ReportError> {
    if family.members.iter().any(Member::reported) {
        ensure_usable(family.id, "design_resistance", family.design_resistance)?;
        ensure_usable(family.id, "radius", family.radius)?;
    }
    let area = cross_section_area(family.radius);
    let design_psi = family.design_resistance;
    let design_mpa = design_psi / PSI_PER_MPA;

    family
        .members
        .iter()
        .filter(|m| m.reported())
        .map(|member| {
            let measured = Measured::from_member(member)?;
            let strength_kg_cm2 =
                (measured.result / area) * f64::from(ADJUSTMENT_FACTOR) * KG_CM2_FACTOR;
            let strength_psi = strength_kg_cm2 / KG_CM2_PER_PSI;
            let obtained_percent = strength_psi / design_psi * 100.0;
            let diameter_cm = family.radius * 2.0;

            Ok(ReportRow {
                member_id: member.id,
                sample_place: family.sample_place.clone(),
                date_of_entry: measured.date_of_entry,
                fractured_on: measured.fractured_on,
                age_days: measured.age_days,
                diameter_cm,
                length_cm: family.height,
                area_cm2: area,
                adjustment_factor: ADJUSTMENT_FACTOR,
                result: measured.result,
                strength_kg_cm2,
                strength_psi,
                design_psi,
                design_mpa,
                obtained_percent,
                failure_shape: measured.failure_shape.to_string(),
                operative: member
                    .operative
                    .as_ref()
                    .map(|o| o.display_name())
                    .unwrap_or_default(),
                display: RowDisplay {
                    date_of_entry: measured.date_of_entry.format("%Y-%m-%d").to_string(),
                    fractured_on: measured.fractured_on.format("%Y-%m-%d").to_string(),
                    diameter_cm: two_decimals(diameter_cm),
                    length_cm: two_decimals(family.height),
                    area_cm2: two_decimals(area),
                    strength_kg_cm2: two_decimals(strength_kg_cm2),
                    strength_psi: two_decimals(strength_psi),
                    design_psi: two_decimals(design_psi),
                    design_mpa: two_decimals(design_mpa),
                    obtained_percent: two_decimals(obtained_percent),
                },
            })
        })
        .collect()
}

/// The measurements a reported member must carry.
struct Measured<'a> {
    result: f64,
    fractured_on: NaiveDate,
    date_of_entry: NaiveDate,
    age_days: i64,
    failure_shape: &'a str,
}

impl<'a> Measured<'a> {
    fn from_member(member: &'a Member) -> Result<Self, ReportError> {
        let missing = |field: &'static str| ReportError::DataIntegrity {
            member_id: member.id,
            field,
        };

        let result = member.result.ok_or_else(|| missing("result"))?;
        let fractured_at = member.fractured_at.ok_or_else(|| missing("fractured_at"))?;
        let date_of_fracture = member
            .date_of_fracture
            .ok_or_else(|| missing("date_of_fracture"))?;
        let age_days = member.fracture_days.ok_or_else(|| missing("fracture_days"))?;
        let failure_shape = member
            .fracture_type
            .as_deref()
            .ok_or_else(|| missing("fracture_type"))?;

        let date_of_entry = u64::try_from(age_days)
            .ok()
            .and_then(|days| date_of_fracture.checked_sub_days(Days::new(days)))
            .ok_or_else(|| missing("fracture_days"))?;

        Ok(Self {
            result,
            fractured_on: fractured_at.date_naive(),
            date_of_entry,
            age_days,
            failure_shape,
        })
    }
}
