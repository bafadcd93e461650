//! CSV/TSV読み込み

use super::{normalize_cell, Table};
use crate::error::Result;
use std::io::Read;
use std::path::Path;

pub fn load_delimited(path: &Path, delimiter: u8) -> Result<Table> {
    let file = std::fs::File::open(path)?;
    load_delimited_from_reader(file, delimiter)
}

/// 任意のリーダーから読み込み（1行目は見出し）
pub fn load_delimited_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            // BOM除去
            let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
            h.trim().to_string()
        })
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(normalize_cell).collect());
    }

    Ok(Table::new(headers, rows))
}
