//! One-shot generation of the header-only workbook.

use std::path::Path;

use tracing::{info, instrument};

use crate::error::Result;
use crate::io::excel_write;
use crate::schema::WorkbookSchema;
use crate::table::{SheetTable, WorkbookData};

/// Creates a new workbook at `output` containing every schema sheet in
/// declared order, each with its styled header row and no data rows. An
/// existing file at the path is fully replaced, never merged.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn build_workbook(output: &Path, schema: &WorkbookSchema) -> Result<()> {
    schema.validate()?;

    let tables = schema.sheets.iter().map(SheetTable::empty).collect();
    let workbook = WorkbookData { tables };

    info!(
        sheet_count = workbook.tables.len(),
        "writing header-only workbook"
    );
    excel_write::write_workbook(output, schema, &workbook)
}
