//! JSONレポート
//!
//! 照合結果に実行条件（閾値・重み・件数・生成日時）を付けて出力する。

use crate::error::Result;
use brand_dedup_common::{FilterOptions, TokenWeights};
use serde::Serialize;
use std::io::Write;

/// 照合の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepMode {
    Names,
    Descriptions,
}

impl SweepMode {
    /// 既定の出力ファイル名（拡張子なし）
    pub fn file_stem(&self) -> &'static str {
        match self {
            SweepMode::Names => "brand_matches",
            SweepMode::Descriptions => "description_matches",
        }
    }

    pub fn sheet_name(&self) -> &'static str {
        match self {
            SweepMode::Names => "brand matches",
            SweepMode::Descriptions => "description matches",
        }
    }
}

/// 実行条件
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub mode: SweepMode,
    /// 入力ファイル
    pub source: Option<String>,
    pub options: FilterOptions,
    /// 欠損除外前の入力行数
    pub record_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a, T> {
    generated_at: String,
    mode: SweepMode,
    source: Option<&'a str>,
    threshold: f64,
    weights: TokenWeights,
    record_count: usize,
    match_count: usize,
    matches: &'a [T],
}

pub fn write_json_report<W, T>(writer: W, matches: &[T], meta: &ReportMeta) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    let report = JsonReport {
        generated_at: chrono::Local::now().to_rfc3339(),
        mode: meta.mode,
        source: meta.source.as_deref(),
        threshold: meta.options.threshold,
        weights: meta.options.weights,
        record_count: meta.record_count,
        match_count: matches.len(),
        matches,
    };
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}
