//! Excel writer: materialises workbook data with the schema's presentation
//! defaults (header style, column widths, pick-list dropdowns).

use std::fs;
use std::path::Path;

use rust_xlsxwriter::{
    Color, DataValidation, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
};

use crate::error::Result;
use crate::schema::{DEFAULT_COLUMN_WIDTH, SheetDef, WorkbookSchema};
use crate::table::WorkbookData;

const HEADER_FILL: Color = Color::RGB(0x4472C4);

/// Rows below the header covered by each pick-list dropdown, so manual entry
/// keeps the choices after the scraped rows end.
const PICK_LIST_ROWS: u32 = 1000;

fn header_format() -> Format {
    Format::new()
        .set_font_name("Arial")
        .set_font_size(12)
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(HEADER_FILL)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Thin)
}

/// Writes the provided workbook data to the given path.
///
/// The file is assembled fully in memory and committed with a single
/// filesystem write, so a failure part-way never leaves a truncated workbook
/// behind. Any existing file at the path is replaced.
pub fn write_workbook(path: &Path, schema: &WorkbookSchema, data: &WorkbookData) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = header_format();

    for table in &data.tables {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&table.sheet_name)?;

        for (col_idx, name) in table.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col_idx as u16, name, &header)?;
            worksheet.set_column_width(col_idx as u16, DEFAULT_COLUMN_WIDTH)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                worksheet.write_string((row_idx + 1) as u32, col_idx as u16, cell)?;
            }
        }

        if let Some(def) = schema.sheet(&table.sheet_name) {
            add_pick_lists(worksheet, def, table.rows.len() as u32)?;
        }
    }

    let buffer = workbook.save_to_buffer()?;
    fs::write(path, buffer)?;
    Ok(())
}

fn add_pick_lists(worksheet: &mut Worksheet, def: &SheetDef, data_rows: u32) -> Result<()> {
    let last_row = data_rows.max(PICK_LIST_ROWS);
    for (column, options) in &def.pick_lists {
        let Some(col_idx) = def.column_index(column) else {
            continue;
        };
        let validation = DataValidation::new().allow_list_strings(options)?;
        worksheet.add_data_validation(1, col_idx as u16, last_row, col_idx as u16, &validation)?;
    }
    Ok(())
}
