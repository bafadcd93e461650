//! CSV出力

use crate::error::Result;
use brand_dedup_common::export::MatchRow;
use std::io::Write;

pub fn write_csv<W: Write, T: MatchRow>(writer: W, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(T::HEADERS)?;
    for row in rows {
        writer.write_record(row.cells().iter().map(|cell| cell.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
