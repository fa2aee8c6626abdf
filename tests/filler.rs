use std::fs;

use tempfile::tempdir;
use uniscout::ToolError;
use uniscout::builder::build_workbook;
use uniscout::fill::extract::Record;
use uniscout::fill::{apply_records, roster};
use uniscout::io::{excel_read, excel_write};
use uniscout::schema::{SHEET_UNIVERSITY, SheetDef, WorkbookSchema};

#[test]
fn read_tables_round_trips_a_built_workbook() {
    let schema = WorkbookSchema::default_schema();
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("Information.xlsx");

    build_workbook(&path, &schema).expect("workbook built");
    let data = excel_read::read_tables(&path, &schema).expect("workbook read");

    assert_eq!(data.tables.len(), schema.sheets.len());
    for (table, sheet) in data.tables.iter().zip(&schema.sheets) {
        assert_eq!(table.sheet_name, sheet.name);
        assert_eq!(table.columns, sheet.columns);
        assert!(table.rows.is_empty());
    }
}

#[test]
fn read_tables_rejects_a_workbook_with_a_missing_sheet() {
    let partial = WorkbookSchema {
        sheets: vec![SheetDef::new("Universities", &["Name", "Country"])],
    };
    let expected = WorkbookSchema {
        sheets: vec![
            SheetDef::new("Universities", &["Name", "Country"]),
            SheetDef::new("Programs", &["University", "Degree"]),
        ],
    };
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("partial.xlsx");

    build_workbook(&path, &partial).expect("workbook built");
    let result = excel_read::read_tables(&path, &expected);

    match result {
        Err(ToolError::SchemaMismatch { sheet, .. }) => assert_eq!(sheet, "Programs"),
        other => panic!("expected schema mismatch, got {other:?}"),
    }
}

#[test]
fn read_tables_rejects_a_drifted_header_row() {
    let drifted = WorkbookSchema {
        sheets: vec![SheetDef::new("Universities", &["Name", "Nation"])],
    };
    let expected = WorkbookSchema {
        sheets: vec![SheetDef::new("Universities", &["Name", "Country"])],
    };
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("drifted.xlsx");

    build_workbook(&path, &drifted).expect("workbook built");
    let result = excel_read::read_tables(&path, &expected);

    match result {
        Err(ToolError::SchemaMismatch { sheet, .. }) => assert_eq!(sheet, "Universities"),
        other => panic!("expected schema mismatch, got {other:?}"),
    }
}

#[test]
fn existing_rows_survive_a_read_merge_write_cycle() {
    let schema = WorkbookSchema::default_schema();
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("Information.xlsx");
    let output = temp_dir.path().join("Information_Filled.xlsx");

    build_workbook(&input, &schema).expect("workbook built");

    // A row entered by hand between runs.
    let mut data = excel_read::read_tables(&input, &schema).expect("workbook read");
    let manual = Record::new(SHEET_UNIVERSITY)
        .with("Univ_ID", "UNIV999")
        .with("University", "Hand-Entered University")
        .with("Country", "Nowhere");
    apply_records(&mut data, &schema, vec![manual]);
    excel_write::write_workbook(&input, &schema, &data).expect("rows written");

    // A later merge for a different institution must leave it untouched.
    let mut data = excel_read::read_tables(&input, &schema).expect("workbook reread");
    let scraped = Record::new(SHEET_UNIVERSITY)
        .with("Univ_ID", "UNIV001")
        .with("University", "MIT")
        .with("Country", "United States");
    apply_records(&mut data, &schema, vec![scraped]);
    excel_write::write_workbook(&output, &schema, &data).expect("output written");

    let merged = excel_read::read_tables(&output, &schema).expect("output read");
    let universities = &merged.tables[0];
    assert_eq!(universities.rows.len(), 2);
    assert!(
        universities
            .rows
            .iter()
            .any(|row| row[3] == "Hand-Entered University")
    );
    assert!(universities.rows.iter().any(|row| row[3] == "MIT"));
}

#[test]
fn custom_roster_loads_from_json() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("roster.json");
    fs::write(
        &path,
        r#"[
            {
                "country": "Switzerland",
                "universities": [
                    {"name": "ETH Zurich", "city": "Zurich", "url": "https://ethz.ch/en.html"}
                ]
            }
        ]"#,
    )
    .expect("roster written");

    let roster = roster::from_file(&path).expect("roster parsed");
    let institutions = roster::institutions(&roster);
    assert_eq!(institutions.len(), 1);
    assert_eq!(institutions[0].id, "UNIV001");
    assert_eq!(institutions[0].currency, "CHF");
}

#[test]
fn empty_roster_is_rejected() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("roster.json");
    fs::write(&path, r#"[{"country": "Nowhere", "universities": []}]"#).expect("roster written");

    assert!(roster::from_file(&path).is_err());
}
