//! レポート出力の共通部品

#[cfg(feature = "excel")]
pub mod excel_core;

use crate::types::{DescriptionMatch, NameMatch};

/// セル値
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Score(u8),
}

impl std::fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Score(n) => write!(f, "{}", n),
        }
    }
}

/// 表形式で出力できる照合結果
pub trait MatchRow {
    /// 列見出し
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<CellValue<'_>>;
}

impl MatchRow for NameMatch {
    const HEADERS: &'static [&'static str] = &["brand1", "brand2", "score"];

    fn cells(&self) -> Vec<CellValue<'_>> {
        vec![
            CellValue::Text(&self.item1),
            CellValue::Text(&self.item2),
            CellValue::Score(self.score),
        ]
    }
}

impl MatchRow for DescriptionMatch {
    const HEADERS: &'static [&'static str] =
        &["description1", "description2", "brand1", "brand2", "score"];

    fn cells(&self) -> Vec<CellValue<'_>> {
        vec![
            CellValue::Text(&self.description1),
            CellValue::Text(&self.description2),
            CellValue::Text(&self.label1),
            CellValue::Text(&self.label2),
            CellValue::Score(self.score),
        ]
    }
}
