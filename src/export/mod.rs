pub mod delimited;
pub mod excel;
pub mod report;
pub mod table;

pub use report::{ReportMeta, SweepMode};

use crate::cli::OutputFormat;
use crate::error::Result;
use brand_dedup_common::export::MatchRow;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

fn output_path_for_format(output: &Path, file_stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", file_stem, extension))
    } else {
        output.to_path_buf()
    }
}

/// 照合結果を指定形式で出力
///
/// `table` で出力先がなければ標準出力に表示する。
/// ファイル形式で出力先がなければカレントディレクトリに既定名で書き出す。
///
/// # Returns
/// 書き出したファイルのパス（標準出力の場合は None）
pub fn export_matches<T>(
    matches: &[T],
    meta: &ReportMeta,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<Option<PathBuf>>
where
    T: MatchRow + Serialize,
{
    if format == OutputFormat::Table && output.is_none() {
        let stdout = std::io::stdout();
        table::write_table(&mut stdout.lock(), matches)?;
        return Ok(None);
    }

    let base = output.unwrap_or_else(|| Path::new("."));
    let output_path = output_path_for_format(base, meta.mode.file_stem(), format.extension());
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        OutputFormat::Table => {
            let mut writer = BufWriter::new(File::create(&output_path)?);
            table::write_table(&mut writer, matches)?;
        }
        OutputFormat::Json => {
            let writer = BufWriter::new(File::create(&output_path)?);
            report::write_json_report(writer, matches, meta)?;
        }
        OutputFormat::Csv => {
            let writer = BufWriter::new(File::create(&output_path)?);
            delimited::write_csv(writer, matches)?;
        }
        OutputFormat::Excel => {
            excel::generate_excel(matches, &output_path, meta.mode.sheet_name())?;
        }
    }

    tracing::debug!(path = %output_path.display(), rows = matches.len(), %format, "report written");
    Ok(Some(output_path))
}
