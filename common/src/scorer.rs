//! 重み付きJaccard類似度
//!
//! 2つの文字列を空白で分割したトークン集合を比較し、0〜100の整数スコアを返す。
//! ボキャブラリにないトークン（ブランド固有語）は `brand_weight`、
//! ボキャブラリにあるトークン（一般語）は `common_weight` で重み付けする。
//!
//! 入力は小文字化・クリーニング済みであることが前提（ここでは検証しない）。

use crate::error::{Error, Result};
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_BRAND_WEIGHT: f64 = 2.0;
pub const DEFAULT_COMMON_WEIGHT: f64 = 1.0;

/// トークン種別ごとの重み
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenWeights {
    /// ブランド固有語（ボキャブラリ外）の重み
    pub brand_weight: f64,
    /// 一般語（ボキャブラリ内）の重み
    pub common_weight: f64,
}

impl Default for TokenWeights {
    fn default() -> Self {
        Self {
            brand_weight: DEFAULT_BRAND_WEIGHT,
            common_weight: DEFAULT_COMMON_WEIGHT,
        }
    }
}

impl TokenWeights {
    /// 検証付きで生成（有限かつ0以上）
    pub fn new(brand_weight: f64, common_weight: f64) -> Result<Self> {
        for (name, value) in [("brand_weight", brand_weight), ("common_weight", common_weight)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidWeights(format!(
                    "{} は0以上の有限値が必要です: {}",
                    name, value
                )));
            }
        }
        Ok(Self {
            brand_weight,
            common_weight,
        })
    }

    /// トークンの重み
    pub fn weight_of(&self, token: &str, vocabulary: &Vocabulary) -> f64 {
        if vocabulary.contains(token) {
            self.common_weight
        } else {
            self.brand_weight
        }
    }
}

/// 類似度関数の差し替え口
///
/// 既定は [`WeightedJaccard`]。同じシグネチャの関数・クロージャもそのまま使える。
pub trait Scorer: Sync {
    fn score(&self, s1: &str, s2: &str, vocabulary: &Vocabulary, weights: &TokenWeights) -> u8;
}

impl<F> Scorer for F
where
    F: Fn(&str, &str, &Vocabulary, &TokenWeights) -> u8 + Sync,
{
    fn score(&self, s1: &str, s2: &str, vocabulary: &Vocabulary, weights: &TokenWeights) -> u8 {
        self(s1, s2, vocabulary, weights)
    }
}

/// 既定のスコアラ（重み付きJaccard）
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedJaccard;

impl Scorer for WeightedJaccard {
    fn score(&self, s1: &str, s2: &str, vocabulary: &Vocabulary, weights: &TokenWeights) -> u8 {
        weighted_score(s1, s2, vocabulary, weights)
    }
}

/// スコアの内訳
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub score: u8,
    /// 共通トークン（ソート済み）
    pub intersection: Vec<String>,
    /// 和集合トークン（ソート済み）
    pub union: Vec<String>,
    pub weighted_intersection: f64,
    pub weighted_union: f64,
}

/// 重み付きJaccard類似度を計算（0〜100、切り捨て）
///
/// 両方とも空（空白のみ）の場合は0を返す。
pub fn weighted_score(s1: &str, s2: &str, vocabulary: &Vocabulary, weights: &TokenWeights) -> u8 {
    let tokens1 = tokenize(s1);
    let tokens2 = tokenize(s2);

    let union: HashSet<&str> = tokens1.union(&tokens2).copied().collect();
    if union.is_empty() {
        return 0;
    }
    let intersection = tokens1.intersection(&tokens2).copied();

    let weighted_intersection = weighted_sum(intersection, vocabulary, weights);
    let weighted_union = weighted_sum(union.iter().copied(), vocabulary, weights);

    to_percent(weighted_intersection, weighted_union)
}

/// スコアと内訳を計算
pub fn score_breakdown(
    s1: &str,
    s2: &str,
    vocabulary: &Vocabulary,
    weights: &TokenWeights,
) -> ScoreBreakdown {
    let tokens1 = tokenize(s1);
    let tokens2 = tokenize(s2);

    let mut union: Vec<&str> = tokens1.union(&tokens2).copied().collect();
    let mut intersection: Vec<&str> = tokens1.intersection(&tokens2).copied().collect();
    union.sort_unstable();
    intersection.sort_unstable();

    let weighted_intersection = weighted_sum(intersection.iter().copied(), vocabulary, weights);
    let weighted_union = weighted_sum(union.iter().copied(), vocabulary, weights);
    let score = if union.is_empty() {
        0
    } else {
        to_percent(weighted_intersection, weighted_union)
    };

    ScoreBreakdown {
        score,
        intersection: intersection.into_iter().map(String::from).collect(),
        union: union.into_iter().map(String::from).collect(),
        weighted_intersection,
        weighted_union,
    }
}

/// 空白区切りでトークン集合に分割（重複は1つにまとめる）
fn tokenize(s: &str) -> HashSet<&str> {
    s.split_whitespace().collect()
}

/// 重みの合計（集合の走査順に依存しないよう種別ごとに数えてから掛ける）
fn weighted_sum<'a, I>(tokens: I, vocabulary: &Vocabulary, weights: &TokenWeights) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    let (mut brand, mut common) = (0usize, 0usize);
    for token in tokens {
        if vocabulary.contains(token) {
            common += 1;
        } else {
            brand += 1;
        }
    }
    brand as f64 * weights.brand_weight + common as f64 * weights.common_weight
}

fn to_percent(weighted_intersection: f64, weighted_union: f64) -> u8 {
    // 重みが全て0の場合など
    if weighted_union.is_nan() || weighted_union <= 0.0 {
        return 0;
    }
    let percent = (weighted_intersection / weighted_union * 100.0).trunc();
    percent.clamp(0.0, 100.0) as u8
}
