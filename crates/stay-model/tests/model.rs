//! Tests for stay-model types.

use chrono::NaiveDate;
use stay_model::{
    ColumnBinding, ColumnMapping, Field, ImportRecord, ImportResult, MatchKind, RowOrigin,
    SheetMapping,
};

fn record(national_id: Option<&str>, passport: Option<&str>) -> ImportRecord {
    ImportRecord {
        national_id: national_id.map(String::from),
        passport: passport.map(String::from),
        surname: "García".to_string(),
        given_name: "Juan Pablo".to_string(),
        nationality: "Argentina".to_string(),
        origin: "Salta".to_string(),
        profession: Some("Docente".to_string()),
        phone: None,
        establishment: Some("Hotel Central".to_string()),
        room: "12".to_string(),
        destination: None,
        vehicle_present: true,
        vehicle_details: Some("AB 123 CD".to_string()),
        check_in_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        check_out_date: None,
        age: Some(23),
        birth_date: NaiveDate::from_ymd_opt(2000, 5, 20),
        source: RowOrigin::new("1", 2),
    }
}

#[test]
fn document_key_prefers_national_id() {
    assert_eq!(
        record(Some("35123456"), Some("AA1234567")).document_key(),
        Some("35123456")
    );
    assert_eq!(record(None, Some("AA1234567")).document_key(), Some("AA1234567"));
}

#[test]
fn person_and_stay_projections_split_the_record() {
    let record = record(Some("35123456"), None);
    let person = record.person();
    let stay = record.stay();

    assert_eq!(person.document_key(), Some("35123456"));
    assert_eq!(person.surname, "García");
    assert_eq!(person.birth_date, NaiveDate::from_ymd_opt(2000, 5, 20));
    assert_eq!(stay.room, "12");
    assert_eq!(stay.age, Some(23));
    assert!(stay.vehicle_present);
    assert_eq!(stay.vehicle_details.as_deref(), Some("AB 123 CD"));
}

#[test]
fn row_origin_display() {
    assert_eq!(RowOrigin::new("2", 7).to_string(), "sheet '2' row 7");
    assert_eq!(RowOrigin::new("", 7).to_string(), "row 7");
}

#[test]
fn consolidated_mapping_merges_sheets() {
    let sheet = |name: &str, header: &str, field: Field| SheetMapping {
        sheet: name.to_string(),
        mapping: ColumnMapping {
            bindings: vec![ColumnBinding {
                header: header.to_string(),
                field,
                kind: MatchKind::Exact,
            }],
            ..ColumnMapping::default()
        },
    };
    let result = ImportResult {
        mappings: vec![
            sheet("1", "dni", Field::NationalId),
            sheet("2", "documento", Field::NationalId),
        ],
        sheet_names: vec!["1".to_string(), "2".to_string()],
        ..ImportResult::default()
    };

    let merged = result.consolidated_mapping();
    assert_eq!(merged.len(), 2);
    assert_eq!(merged.get("documento"), Some(&Field::NationalId));
    assert_eq!(result.sheet_count(), 2);
    assert!(!result.has_errors());
}

#[test]
fn result_serializes_to_json() {
    let result = ImportResult {
        total_rows: 1,
        processed_rows: 1,
        valid: vec![record(Some("35123456"), None)],
        ..ImportResult::default()
    };
    let json = serde_json::to_string(&result).expect("serialize result");
    assert!(json.contains("\"check_in_date\":\"2024-05-10\""));
    let round: ImportResult = serde_json::from_str(&json).expect("deserialize result");
    assert_eq!(round, result);
}
