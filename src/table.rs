//! In-memory representation of workbook content.

use crate::schema::SheetDef;

/// A table that will be materialised as an Excel sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    /// A header-only table for the given sheet definition.
    pub fn empty(def: &SheetDef) -> Self {
        Self {
            sheet_name: def.name.clone(),
            columns: def.columns.clone(),
            rows: Vec::new(),
        }
    }

    /// Inserts or replaces a row. When `key_index` is given and the new row
    /// carries a non-empty value there, an existing row with the same value in
    /// that column is replaced in place; otherwise the row is appended.
    pub fn upsert_row(&mut self, key_index: Option<usize>, row: Vec<String>) {
        let key = key_index
            .and_then(|index| row.get(index).cloned())
            .filter(|value| !value.is_empty());

        if let (Some(index), Some(key)) = (key_index, key) {
            let existing = self
                .rows
                .iter_mut()
                .find(|candidate| candidate.get(index).map(String::as_str) == Some(key.as_str()));
            if let Some(existing) = existing {
                *existing = row;
                return;
            }
        }

        self.rows.push(row);
    }
}

/// Represents all tables required to materialise the Excel workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookData {
    pub tables: Vec<SheetTable>,
}

impl WorkbookData {
    pub fn table_mut(&mut self, sheet_name: &str) -> Option<&mut SheetTable> {
        self.tables
            .iter_mut()
            .find(|table| table.sheet_name == sheet_name)
    }
}
