//! Excel reader: loads a workbook produced by the builder, checking it
//! against the schema before any row is touched.

use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::{Result, ToolError};
use crate::schema::WorkbookSchema;
use crate::table::{SheetTable, WorkbookData};

/// Reads every schema sheet from the workbook at `path`.
///
/// Fails fast with [`ToolError::SchemaMismatch`] when a sheet is missing or
/// its header row deviates from the declared columns, rather than silently
/// working with drifted structure.
pub fn read_tables(path: &Path, schema: &WorkbookSchema) -> Result<WorkbookData> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let mut tables = Vec::with_capacity(schema.sheets.len());

    for def in &schema.sheets {
        let range_result =
            workbook
                .worksheet_range(&def.name)
                .ok_or_else(|| ToolError::SchemaMismatch {
                    sheet: def.name.clone(),
                    detail: "sheet is missing".into(),
                })?;
        let range = range_result.map_err(ToolError::from)?;

        let mut rows = range.rows();
        let mut headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(|cell| cell_to_string(Some(cell))).collect())
            .unwrap_or_default();
        // The used range can be wider than the header when data rows spill
        // past the declared columns.
        while headers.last().is_some_and(|header| header.is_empty()) {
            headers.pop();
        }

        if headers != def.columns {
            return Err(ToolError::SchemaMismatch {
                sheet: def.name.clone(),
                detail: format!(
                    "header row does not match ({} columns found, {} declared)",
                    headers.len(),
                    def.columns.len()
                ),
            });
        }

        let data_rows = rows
            .map(|row| {
                let mut cells: Vec<String> = row
                    .iter()
                    .map(|cell| cell_to_string(Some(cell)))
                    .collect();
                cells.resize(def.columns.len(), String::new());
                cells
            })
            .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
            .collect();

        tables.push(SheetTable {
            sheet_name: def.name.clone(),
            columns: def.columns.clone(),
            rows: data_rows,
        });
    }

    Ok(WorkbookData { tables })
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
