//! 表データ読み込みモジュール
//!
//! CSV/TSVとExcel系ファイルを共通の `Table` に読み込み、
//! 照合に使う列だけを取り出す。欠損セルは `None`。

mod delimited;
mod spreadsheet;

use crate::error::{DedupError, Result};
use std::path::Path;

pub use delimited::load_delimited_from_reader;

/// 欠損値とみなす表記
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// 読み込んだ表（1行目が見出し）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列番号を取得（完全一致 → 大文字小文字・前後空白を無視して一致）
    pub fn column_index(&self, name: &str) -> Result<usize> {
        if let Some(index) = self.headers.iter().position(|h| h == name) {
            return Ok(index);
        }

        let wanted = name.trim().to_lowercase();
        self.headers
            .iter()
            .position(|h| h.trim().to_lowercase() == wanted)
            .ok_or_else(|| DedupError::ColumnNotFound {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    /// 1列分の値
    pub fn column(&self, name: &str) -> Result<Vec<Option<String>>> {
        let index = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| cell_at(row, index)).collect())
    }

    /// 2列分の値（行ごとの組）
    pub fn column_pair(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Vec<(Option<String>, Option<String>)>> {
        let first = self.column_index(first)?;
        let second = self.column_index(second)?;
        Ok(self
            .rows
            .iter()
            .map(|row| (cell_at(row, first), cell_at(row, second)))
            .collect())
    }
}

fn cell_at(row: &[Option<String>], index: usize) -> Option<String> {
    row.get(index).cloned().flatten()
}

/// セル文字列を正規化（空・欠損表記は None）
///
/// 空白だけのセルは値として残す。前後の空白は照合時に除去される。
pub(crate) fn normalize_cell(raw: &str) -> Option<String> {
    if raw.is_empty() || NA_MARKERS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// 拡張子に応じて表データを読み込む
///
/// # Arguments
/// * `path` - 入力ファイル
/// * `sheet` - Excel系のシート名（省略時は先頭シート）
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<Table> {
    if !path.exists() {
        return Err(DedupError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "csv" | "txt" => delimited::load_delimited(path, b',')?,
        "tsv" => delimited::load_delimited(path, b'\t')?,
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => spreadsheet::load_spreadsheet(path, sheet)?,
        _ => return Err(DedupError::UnsupportedInput(path.display().to_string())),
    };

    if table.headers().is_empty() {
        return Err(DedupError::EmptyTable(path.display().to_string()));
    }

    tracing::debug!(
        path = %path.display(),
        columns = table.headers().len(),
        rows = table.len(),
        "table loaded"
    );
    Ok(table)
}
