//! Excel/ODS読み込み（calamine）

use super::{normalize_cell, Table};
use crate::error::{DedupError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

pub fn load_spreadsheet(path: &Path, sheet: Option<&str>) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();

    let sheet_name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|name| name.as_str() == wanted)
            .cloned()
            .ok_or_else(|| DedupError::SheetNotFound(wanted.to_string()))?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| DedupError::EmptyTable(path.display().to_string()))?,
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell_text(cell).map(|h| h.trim().to_string()).unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };

    let rows = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(Table::new(headers, rows))
}

/// セルを文字列化（空・エラーセルは None）
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => normalize_cell(s),
        other => normalize_cell(&other.to_string()),
    }
}
