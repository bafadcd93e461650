//! 照合結果の型定義
//!
//! - NameMatch: ブランド名どうしの照合結果
//! - DescriptionRecord: 説明文とラベル（ブランド名）の組
//! - DescriptionMatch: 説明文どうしの照合結果

use serde::{Deserialize, Serialize};

/// ブランド名ペアの照合結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameMatch {
    pub item1: String,
    pub item2: String,
    pub score: u8,
}

impl NameMatch {
    pub fn as_tuple(&self) -> (&str, &str, u8) {
        (&self.item1, &self.item2, self.score)
    }
}

impl From<NameMatch> for (String, String, u8) {
    fn from(m: NameMatch) -> Self {
        (m.item1, m.item2, m.score)
    }
}

/// 説明文 + ラベルの1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionRecord {
    pub description: String,
    pub label: String,
}

impl DescriptionRecord {
    /// どちらかが欠損していれば None。前後の空白は除去する。
    pub fn from_optional<D, L>(description: Option<D>, label: Option<L>) -> Option<Self>
    where
        D: AsRef<str>,
        L: AsRef<str>,
    {
        Some(Self {
            description: description?.as_ref().trim().to_string(),
            label: label?.as_ref().trim().to_string(),
        })
    }
}

/// 説明文ペアの照合結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionMatch {
    pub description1: String,
    pub description2: String,
    pub label1: String,
    pub label2: String,
    pub score: u8,
}

impl DescriptionMatch {
    pub fn as_tuple(&self) -> (&str, &str, &str, &str, u8) {
        (
            &self.description1,
            &self.description2,
            &self.label1,
            &self.label2,
            self.score,
        )
    }
}

impl From<DescriptionMatch> for (String, String, String, String, u8) {
    fn from(m: DescriptionMatch) -> Self {
        (m.description1, m.description2, m.label1, m.label2, m.score)
    }
}
