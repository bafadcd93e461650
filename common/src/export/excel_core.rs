//! Excel生成（共通ライブラリ）
//!
//! 照合結果を1シートの表としてxlsxバッファに書き出す。

use super::{CellValue, MatchRow};
use rust_xlsxwriter::*;

const TEXT_COL_WIDTH: f64 = 40.0;
const SCORE_COL_WIDTH: f64 = 8.0;

/// 照合結果をxlsxバッファに生成
///
/// # Arguments
/// * `rows` - 照合結果（MatchRowトレイトを実装した型）
/// * `sheet_name` - シート名
pub fn generate_excel_buffer<T: MatchRow>(rows: &[T], sheet_name: &str) -> Result<Vec<u8>, String> {
    build_workbook(rows, sheet_name)
        .and_then(|mut workbook| workbook.save_to_buffer())
        .map_err(|e| e.to_string())
}

fn build_workbook<T: MatchRow>(rows: &[T], sheet_name: &str) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    // 見出し
    for (col, header) in T::HEADERS.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *header, &header_format)?;
        let width = if *header == "score" { SCORE_COL_WIDTH } else { TEXT_COL_WIDTH };
        worksheet.set_column_width(col, width)?;
    }

    // データ行
    for (i, row) in rows.iter().enumerate() {
        let row_num = (i + 1) as u32;
        for (col, cell) in row.cells().into_iter().enumerate() {
            match cell {
                CellValue::Text(text) => {
                    worksheet.write_string(row_num, col as u16, text)?;
                }
                CellValue::Score(score) => {
                    worksheet.write_number(row_num, col as u16, f64::from(score))?;
                }
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    let last_col = T::HEADERS.len().saturating_sub(1) as u16;
    worksheet.autofilter(0, 0, rows.len() as u32, last_col)?;

    Ok(workbook)
}
