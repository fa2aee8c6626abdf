use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tempfile::tempdir;
use uniscout::ToolError;
use uniscout::builder::build_workbook;
use uniscout::io::excel_write;
use uniscout::schema::{SheetDef, WorkbookSchema};
use uniscout::table::{SheetTable, WorkbookData};

fn sheet_names(path: &Path) -> Vec<String> {
    let workbook: Xlsx<_> = open_workbook(path).expect("workbook opens");
    workbook.sheet_names().to_vec()
}

fn sheet_rows(path: &Path, name: &str) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("workbook opens");
    let range = workbook
        .worksheet_range(name)
        .expect("sheet present")
        .expect("sheet readable");
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    DataType::String(value) => value.clone(),
                    DataType::Empty => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect()
}

#[test]
fn build_writes_declared_sheets_in_declared_order() {
    let schema = WorkbookSchema::default_schema();
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("Information.xlsx");

    build_workbook(&path, &schema).expect("workbook built");

    let declared: Vec<String> = schema.sheets.iter().map(|sheet| sheet.name.clone()).collect();
    assert_eq!(sheet_names(&path), declared);
}

#[test]
fn build_writes_header_rows_and_no_data_rows() {
    let schema = WorkbookSchema::default_schema();
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("Information.xlsx");

    build_workbook(&path, &schema).expect("workbook built");

    for sheet in &schema.sheets {
        let rows = sheet_rows(&path, &sheet.name);
        assert_eq!(rows.len(), 1, "{} holds only the header row", sheet.name);
        assert_eq!(rows[0], sheet.columns, "{} header matches", sheet.name);
    }
}

#[test]
fn build_accepts_a_custom_two_sheet_schema() {
    let schema = WorkbookSchema {
        sheets: vec![
            SheetDef::new("Universities", &["Name", "Country"]),
            SheetDef::new("Programs", &["University", "Degree"]),
        ],
    };
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("custom.xlsx");

    build_workbook(&path, &schema).expect("workbook built");

    assert_eq!(sheet_names(&path), vec!["Universities", "Programs"]);
    assert_eq!(
        sheet_rows(&path, "Universities"),
        vec![vec!["Name".to_string(), "Country".to_string()]]
    );
    assert_eq!(
        sheet_rows(&path, "Programs"),
        vec![vec!["University".to_string(), "Degree".to_string()]]
    );
}

#[test]
fn rebuild_fully_replaces_a_populated_workbook() {
    let schema = WorkbookSchema {
        sheets: vec![SheetDef::new("Universities", &["Name", "Country"])],
    };
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("Information.xlsx");

    // First run, then simulate rows added by a later tool or by hand.
    build_workbook(&path, &schema).expect("workbook built");
    let populated = WorkbookData {
        tables: vec![SheetTable {
            sheet_name: "Universities".into(),
            columns: vec!["Name".into(), "Country".into()],
            rows: vec![vec!["MIT".into(), "United States".into()]],
        }],
    };
    excel_write::write_workbook(&path, &schema, &populated).expect("rows written");
    assert_eq!(sheet_rows(&path, "Universities").len(), 2);

    // The second build must replace the file, not merge with prior rows.
    build_workbook(&path, &schema).expect("workbook rebuilt");
    assert_eq!(
        sheet_rows(&path, "Universities"),
        vec![vec!["Name".to_string(), "Country".to_string()]]
    );
}

#[test]
fn build_rejects_an_invalid_schema_before_touching_the_path() {
    let schema = WorkbookSchema {
        sheets: vec![SheetDef::new("Empty", &[])],
    };
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("never-written.xlsx");

    let result = build_workbook(&path, &schema);
    assert!(matches!(result, Err(ToolError::InvalidSchema(_))));
    assert!(!path.exists());
}

#[test]
fn build_fails_on_an_unwritable_path() {
    let schema = WorkbookSchema::default_schema();
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("no-such-directory").join("Information.xlsx");

    assert!(build_workbook(&path, &schema).is_err());
}
