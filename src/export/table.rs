//! テキスト表出力

use crate::error::Result;
use brand_dedup_common::export::{CellValue, MatchRow};
use std::io::Write;

/// 列幅を揃えた表を書き出す（スコア列は右寄せ）
pub fn write_table<W: Write, T: MatchRow>(writer: &mut W, rows: &[T]) -> Result<()> {
    if rows.is_empty() {
        writeln!(writer, "該当するペアはありません")?;
        return Ok(());
    }

    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.cells().iter().enumerate() {
            widths[i] = widths[i].max(cell.to_string().chars().count());
        }
    }

    let header: Vec<String> = T::HEADERS
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<width$}", h, width = *w))
        .collect();
    writeln!(writer, "{}", header.join(" | ").trim_end())?;

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(writer, "{}", rule.join("-+-"))?;

    for row in rows {
        let line: Vec<String> = row
            .cells()
            .iter()
            .zip(&widths)
            .map(|(cell, w)| match cell {
                CellValue::Score(score) => format!("{:>width$}", score, width = *w),
                CellValue::Text(text) => format!("{:<width$}", text, width = *w),
            })
            .collect();
        writeln!(writer, "{}", line.join(" | ").trim_end())?;
    }

    writeln!(writer, "\n{}件", rows.len())?;
    Ok(())
}
