//! End-to-end imports over workbooks authored with rust_xlsxwriter.

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use stay_core::{
    ImportError, ImportOptions, ImportProgress, Importer, MemoryStore, MemoryStoreError, commit,
};
use stay_model::{Field, MatchKind, RequiredGroup, RowOrigin};
use tempfile::{TempDir, tempdir};

type Sheet<'a> = (&'a str, Vec<Vec<&'a str>>);

fn write_workbook(dir: &TempDir, sheets: &[Sheet<'_>]) -> PathBuf {
    let path = dir.path().join("registro.xlsx");
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name).unwrap();
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet
                        .write_string(row_idx as u32, col_idx as u16, *value)
                        .unwrap();
                }
            }
        }
    }
    workbook.save(&path).unwrap();
    path
}

fn importer() -> Importer {
    Importer::with_default_aliases(ImportOptions::default()).unwrap()
}

fn two_sheet_register(dir: &TempDir) -> PathBuf {
    write_workbook(
        dir,
        &[
            (
                "1",
                vec![
                    vec!["N°", "Apellido y Nombre", "D.N.I.", "Fecha Entrada", "Habitación"],
                    vec!["1", "Pérez, Ana", "30.111.222", "01/05/2024", "12"],
                    vec!["2", "Sosa Marta", "30111666", "02/05/2024", ""],
                ],
            ),
            (
                "2",
                vec![
                    vec!["Apellido", "Nombre", "Documento", "Ingreso"],
                    vec!["Gómez", "Luis", "30111333", "10/05/2024"],
                    vec!["Díaz", "Eva", "aa1234567", "10/05/2024"],
                    vec!["", "", "", ""],
                    vec!["Ruiz", "Juan", "30111555", "sin fecha"],
                    vec!["Vera", "Pablo", "", "11/05/2024"],
                    vec!["Pérez", "Ana", "30111222", "12/05/2024"],
                    vec!["TOTAL", "", "", ""],
                ],
            ),
        ],
    )
}

#[test]
fn multi_sheet_import_tags_every_outcome_with_its_origin() {
    let dir = tempdir().unwrap();
    let path = two_sheet_register(&dir);

    let result = importer().run(&path).unwrap();

    assert_eq!(result.sheet_names, vec!["1", "2"]);
    assert_eq!(result.total_rows, 8);
    assert_eq!(result.processed_rows, 8);

    let valid: Vec<&RowOrigin> = result.valid.iter().map(|r| &r.source).collect();
    assert_eq!(
        valid,
        vec![
            &RowOrigin::new("1", 2),
            &RowOrigin::new("1", 3),
            &RowOrigin::new("2", 2),
            &RowOrigin::new("2", 3),
        ]
    );

    let errors: Vec<(&RowOrigin, &str)> = result
        .errors
        .iter()
        .map(|e| (&e.origin, e.message.as_str()))
        .collect();
    assert_eq!(
        errors,
        vec![
            (&RowOrigin::new("2", 5), "invalid check-in date 'sin fecha'"),
            (
                &RowOrigin::new("2", 6),
                "missing document (national id or passport)"
            ),
        ]
    );

    assert_eq!(result.duplicates.len(), 1);
    let duplicate = &result.duplicates[0];
    assert_eq!(duplicate.key, "30111222");
    assert_eq!(duplicate.first_seen, RowOrigin::new("1", 2));
    assert_eq!(duplicate.record.source, RowOrigin::new("2", 7));

    // "TOTAL" has a name part but no document.
    assert_eq!(result.skipped, 1);
    assert!(result.warnings.is_empty());
}

#[test]
fn records_carry_normalized_values() {
    let dir = tempdir().unwrap();
    let path = two_sheet_register(&dir);

    let result = importer().run(&path).unwrap();

    let first = &result.valid[0];
    assert_eq!(first.surname, "Pérez");
    assert_eq!(first.given_name, "Ana");
    assert_eq!(first.national_id.as_deref(), Some("30111222"));
    assert_eq!(first.room, "12");
    assert_eq!(
        first.check_in_date,
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    );

    let second = &result.valid[1];
    assert_eq!((second.surname.as_str(), second.given_name.as_str()), ("Sosa", "Marta"));
    assert_eq!(second.room, "S/N");

    let passport = &result.valid[3];
    assert_eq!(passport.national_id, None);
    assert_eq!(passport.passport.as_deref(), Some("AA1234567"));
}

#[test]
fn mappings_are_kept_per_sheet() {
    let dir = tempdir().unwrap();
    let path = two_sheet_register(&dir);

    let result = importer().run(&path).unwrap();

    assert_eq!(result.mappings.len(), 2);
    let first = &result.mappings[0].mapping;
    assert_eq!(first.field_for("d.n.i."), Some(Field::NationalId));
    assert_eq!(first.ignored, vec!["n°".to_string()]);
    let second = &result.mappings[1].mapping;
    assert_eq!(second.field_for("documento"), Some(Field::NationalId));

    let consolidated = result.consolidated_mapping();
    assert_eq!(consolidated.get("ingreso"), Some(&Field::CheckInDate));
    assert_eq!(consolidated.get("apellido_y_nombre"), Some(&Field::FullName));
}

#[test]
fn missing_document_column_aborts_before_rows() {
    let dir = tempdir().unwrap();
    let path = write_workbook(
        &dir,
        &[(
            "Hoja1",
            vec![
                vec!["Apellido", "Nombre", "Fecha Entrada"],
                vec!["Gómez", "Luis", "10/05/2024"],
            ],
        )],
    );

    let err = importer().run(&path).unwrap_err();
    assert!(matches!(
        err,
        ImportError::MissingColumns { ref missing } if missing == &vec![RequiredGroup::Document]
    ));
}

#[test]
fn hotel_name_column_is_not_read_as_a_given_name() {
    let dir = tempdir().unwrap();
    let path = write_workbook(
        &dir,
        &[(
            "1",
            vec![
                vec!["Apellido y Nombre", "DNI", "Fecha Entrada", "Nombre del Hotel"],
                vec!["Pérez, Ana", "30111222", "01/05/2024", "Hotel Sol"],
            ],
        )],
    );

    let result = importer().run(&path).unwrap();

    assert!(result.errors.is_empty());
    let record = &result.valid[0];
    assert_eq!(record.surname, "Pérez");
    assert_eq!(record.given_name, "Ana");
    assert_eq!(record.establishment.as_deref(), Some("Hotel Sol"));
}

#[test]
fn descriptive_check_in_header_satisfies_required_columns() {
    let dir = tempdir().unwrap();
    let path = write_workbook(
        &dir,
        &[(
            "1",
            vec![
                vec!["Apellido y Nombre", "DNI", "Fecha Ingreso Hotel", "Ciudad de Destino"],
                vec!["Gómez, Luis", "30111333", "10/05/2024", "Salta"],
            ],
        )],
    );

    let result = importer().run(&path).unwrap();

    let record = &result.valid[0];
    assert_eq!(
        record.check_in_date,
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    );
    assert_eq!(record.destination.as_deref(), Some("Salta"));
    assert_eq!(record.establishment, None);
}

#[test]
fn date_cells_import_with_derived_age() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fechas.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let day_first = Format::new().set_num_format("dd/mm/yyyy");
    for (col, header) in ["Apellido y Nombre", "DNI", "Fecha Entrada", "Fecha Nacimiento"]
        .iter()
        .enumerate()
    {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_string(1, 0, "Pérez, Ana").unwrap();
    sheet.write_string(1, 1, "30111222").unwrap();
    sheet
        .write_datetime_with_format(1, 2, &ExcelDateTime::from_ymd(2024, 5, 10).unwrap(), &day_first)
        .unwrap();
    sheet
        .write_datetime_with_format(1, 3, &ExcelDateTime::from_ymd(2000, 5, 20).unwrap(), &day_first)
        .unwrap();
    workbook.save(&path).unwrap();

    let result = importer().run(&path).unwrap();

    assert!(result.errors.is_empty());
    let record = &result.valid[0];
    assert_eq!(
        record.check_in_date,
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    );
    assert_eq!(record.birth_date, NaiveDate::from_ymd_opt(2000, 5, 20));
    assert_eq!(record.age, Some(23));
}

#[test]
fn preview_reports_missing_columns_without_failing() {
    let dir = tempdir().unwrap();
    let path = write_workbook(
        &dir,
        &[(
            "Hoja1",
            vec![
                vec!["#", "Apellido", "Nombre", "Fecha Entrada"],
                vec!["1", "Gómez", "Luis", "10/05/2024"],
                vec!["2", "Díaz", "Eva", "11/05/2024"],
            ],
        )],
    );

    let preview = importer().preview(&path).unwrap();

    assert_eq!(preview.missing, vec![RequiredGroup::Document]);
    assert!(!preview.is_importable());
    assert_eq!(preview.total_rows, 2);
    assert_eq!(preview.preview.len(), 1);
    let row = &preview.preview[0];
    assert_eq!(row.origin, RowOrigin::new("Hoja1", 2));
    assert_eq!(row.value("Apellido"), Some("Gómez"));
    assert_eq!(row.value("Fecha Entrada"), Some("10/05/2024"));
    assert_eq!(row.value("#"), None);
}

#[test]
fn preview_takes_one_row_per_sheet() {
    let dir = tempdir().unwrap();
    let path = two_sheet_register(&dir);

    let preview = importer().preview(&path).unwrap();

    assert!(preview.is_importable());
    let origins: Vec<&RowOrigin> = preview.preview.iter().map(|row| &row.origin).collect();
    assert_eq!(origins, vec![&RowOrigin::new("1", 2), &RowOrigin::new("2", 2)]);
}

#[test]
fn empty_workbook_is_no_data() {
    let dir = tempdir().unwrap();
    let path = write_workbook(&dir, &[("Hoja1", vec![vec!["DNI", "Apellido"]])]);

    assert!(matches!(
        importer().run(&path),
        Err(ImportError::NoData { .. })
    ));
}

#[test]
fn sheet_selection_limits_the_import() {
    let dir = tempdir().unwrap();
    let path = two_sheet_register(&dir);
    let importer =
        Importer::with_default_aliases(ImportOptions::new().with_sheets(vec!["2".to_string()]))
            .unwrap();

    let result = importer.run(&path).unwrap();

    assert_eq!(result.sheet_names, vec!["2"]);
    assert!(result.valid.iter().all(|r| r.source.sheet == "2"));
    assert!(result.duplicates.is_empty());
}

#[test]
fn row_cap_truncates_with_a_warning() {
    let dir = tempdir().unwrap();
    let path = two_sheet_register(&dir);
    let importer =
        Importer::with_default_aliases(ImportOptions::new().with_max_rows(3)).unwrap();

    let result = importer.run(&path).unwrap();

    assert_eq!(result.total_rows, 8);
    assert_eq!(result.processed_rows, 3);
    assert_eq!(result.valid.len(), 3);
    insta::assert_snapshot!(
        result.warnings.join("\n"),
        @"input has 8 rows; only the first 3 were processed"
    );
}

#[test]
fn overrides_bind_unrecognized_headers() {
    let dir = tempdir().unwrap();
    let path = write_workbook(
        &dir,
        &[(
            "Hoja1",
            vec![
                vec!["Huésped", "Código", "Llegó"],
                vec!["Gómez, Luis", "30111333", "10/05/2024"],
            ],
        )],
    );
    let options = ImportOptions::new()
        .with_override("huésped", Field::FullName)
        .with_override("código", Field::NationalId)
        .with_override("llegó", Field::CheckInDate);

    let result = Importer::with_default_aliases(options)
        .unwrap()
        .run(&path)
        .unwrap();

    assert_eq!(result.valid.len(), 1);
    assert_eq!(result.valid[0].national_id.as_deref(), Some("30111333"));
    assert!(
        result.mappings[0]
            .mapping
            .bindings
            .iter()
            .all(|b| b.kind == MatchKind::Override)
    );
}

#[test]
fn progress_is_reported_per_row() {
    let dir = tempdir().unwrap();
    let path = two_sheet_register(&dir);
    let mut events: Vec<ImportProgress> = Vec::new();

    importer()
        .run_with_progress(&path, |event| events.push(event.clone()))
        .unwrap();

    let rows: Vec<&ImportProgress> = events.iter().filter(|e| e.total == 8).collect();
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0].current, 1);
    let last = events.last().unwrap();
    assert_eq!(last.message, "done");
    assert_eq!(last.fraction(), 1.0);
}

#[test]
fn result_serializes_to_json() {
    let dir = tempdir().unwrap();
    let path = two_sheet_register(&dir);

    let result = importer().run(&path).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["sheet_names"], serde_json::json!(["1", "2"]));
    assert_eq!(json["valid"][0]["check_in_date"], "2024-05-01");
    assert_eq!(json["errors"][0]["origin"]["row"], 5);
}

#[test]
fn committing_twice_reuses_people_and_rejects_repeated_stays() {
    let dir = tempdir().unwrap();
    let path = two_sheet_register(&dir);
    let result = importer().run(&path).unwrap();
    let mut store = MemoryStore::new();

    let first = commit(&result, &mut store, |_| {});
    assert!(first.is_clean());
    assert_eq!(first.stays_created, 4);
    assert_eq!(store.people().len(), 4);

    let second = commit(&result, &mut store, |_| {});
    assert_eq!(second.stays_created, 0);
    assert_eq!(second.failures.len(), 4);
    assert_eq!(store.people().len(), 4);
    assert_eq!(
        second.failures[0].message,
        MemoryStoreError::DuplicateStay {
            check_in: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        }
        .to_string()
    );
}
