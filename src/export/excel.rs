//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに書き出す。

use crate::error::{DedupError, Result};
use brand_dedup_common::export::excel_core::generate_excel_buffer;
use brand_dedup_common::export::MatchRow;
use std::path::Path;

pub fn generate_excel<T: MatchRow>(rows: &[T], output_path: &Path, sheet_name: &str) -> Result<()> {
    let buffer = generate_excel_buffer(rows, sheet_name).map_err(DedupError::ExcelGeneration)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
