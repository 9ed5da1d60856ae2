//! Serde shape and JsonSchema checks for the aggregate entities.

use chrono::{NaiveDate, TimeZone, Utc};
use ct_core::entities::{Client, Family, Member, NewMember, Operative, Project};
use pretty_assertions::assert_eq;
use schemars::schema_for;

fn sample_project() -> Project {
    Project {
        id: 3,
        name: "Torre Norte".into(),
        client_id: 9,
        client: Client {
            id: 9,
            name: "Constructora Andina".into(),
        },
        families: vec![Family {
            id: 11,
            family_type: "cylinder".into(),
            date_of_entry: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            radius: 7.5,
            height: 15.0,
            design_resistance: 3000.0,
            client_id: 9,
            project_id: 3,
            sample_place: "Losa piso 4".into(),
            members: vec![Member {
                id: 21,
                family_id: 11,
                result: Some(350.0),
                date_of_fracture: NaiveDate::from_ymd_opt(2026, 3, 29),
                fractured_at: Some(Utc.with_ymd_and_hms(2026, 3, 29, 10, 0, 0).unwrap()),
                is_reported: Some(true),
                fracture_days: Some(28),
                operative_id: Some(5),
                fracture_type: Some("cone".into()),
                operative: Some(Operative {
                    id: 5,
                    first_name: "Luis".into(),
                    last_name: "Paez".into(),
                    role: "lab".into(),
                    is_active: true,
                }),
            }],
        }],
    }
}

#[test]
fn project_aggregate_roundtrips() {
    let project = sample_project();
    let json = serde_json::to_string_pretty(&project).unwrap();
    let recovered: Project = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, project);
}

#[test]
fn missing_measurements_serialize_as_null() {
    let member = Member {
        id: 1,
        family_id: 2,
        result: None,
        date_of_fracture: None,
        fractured_at: None,
        is_reported: None,
        fracture_days: None,
        operative_id: None,
        fracture_type: None,
        operative: None,
    };
    let value = serde_json::to_value(&member).unwrap();
    assert!(value["result"].is_null());
    assert!(value["fracture_days"].is_null());
    assert!(value["operative"].is_null());
}

#[test]
fn new_member_accepts_sparse_json() {
    let parsed: NewMember = serde_json::from_str(r#"{"family_id": 4}"#).unwrap();
    assert_eq!(parsed.family_id, 4);
    assert_eq!(parsed.result, None);
    assert_eq!(parsed.is_reported, None);
}

#[test]
fn family_lookup_by_id() {
    let project = sample_project();
    assert_eq!(project.family(11).map(|f| f.sample_place.as_str()), Some("Losa piso 4"));
    assert!(project.family(12).is_none());
}

#[test]
fn family_schema_lists_geometry_fields() {
    let schema = serde_json::to_value(schema_for!(Family)).unwrap();
    let properties = schema["properties"].as_object().expect("object schema");
    for field in ["radius", "height", "design_resistance", "members"] {
        assert!(properties.contains_key(field), "missing {field}");
    }
}
