//! ペア照合モジュール
//!
//! 入力レコードの全ペアをスコアリングし、閾値を超えたペアだけを返す。
//!
//! ## バリエーション
//! - ブランド名: 同一文字列のペアは除外し、同じ組み合わせは1回だけ評価
//! - 説明文: 行インデックス i < j の全ペアを評価（同一文字列も評価する）

use crate::scorer::{Scorer, TokenWeights, WeightedJaccard};
use crate::types::{DescriptionMatch, DescriptionRecord, NameMatch};
use crate::vocabulary::Vocabulary;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

pub const DEFAULT_THRESHOLD: f64 = 70.0;

/// 照合オプション
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// この値を超えたスコアのみ採用（同値は除外）
    pub threshold: f64,
    pub weights: TokenWeights,
    /// rayonで並列スコアリング（結果と順序は逐次と同一）
    pub parallel: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            weights: TokenWeights::default(),
            parallel: false,
        }
    }
}

impl FilterOptions {
    pub fn passes(&self, score: u8) -> bool {
        f64::from(score) > self.threshold
    }
}

/// 進捗コールバック (評価済みペア数, 総ペア数)
pub type ProgressFn = dyn Fn(u64, u64) + Send + Sync;

/// n件の入力から作られるペア数
pub fn pair_count(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}

/// ペア照合エンジン
pub struct PairwiseFilter<'v, S = WeightedJaccard> {
    vocabulary: &'v Vocabulary,
    scorer: S,
    options: FilterOptions,
    progress: Option<Arc<ProgressFn>>,
}

impl<'v> PairwiseFilter<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self {
            vocabulary,
            scorer: WeightedJaccard,
            options: FilterOptions::default(),
            progress: None,
        }
    }
}

impl<'v, S: Scorer> PairwiseFilter<'v, S> {
    /// スコア関数を差し替え
    pub fn with_scorer<T: Scorer>(self, scorer: T) -> PairwiseFilter<'v, T> {
        PairwiseFilter {
            vocabulary: self.vocabulary,
            scorer,
            options: self.options,
            progress: self.progress,
        }
    }

    pub fn with_options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_progress<F>(mut self, progress: F) -> Self
    where
        F: Fn(u64, u64) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(progress));
        self
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// ブランド名の類似ペアを抽出
    ///
    /// 欠損値は除外し、前後の空白を除去する。同一文字列どうしは比較しない。
    /// 同じ組み合わせ（順序違いを含む）は最初に現れた向きで1回だけ評価する。
    ///
    /// 全インデックス対を走査して正規化ペアで重複を弾く方式と同じ結果になるよう、
    /// 初出順に重複除去した値の i < j を走査する。
    /// 結果の `item1` は初出が早い方。
    pub fn filter_by_name<I, T>(&self, records: I) -> Vec<NameMatch>
    where
        I: IntoIterator<Item = Option<T>>,
        T: AsRef<str>,
    {
        let names = distinct_names(records);
        let texts: Vec<&str> = names.iter().map(String::as_str).collect();

        let matches: Vec<NameMatch> = self
            .sweep(&texts)
            .into_iter()
            .map(|(i, j, score)| NameMatch {
                item1: names[i].clone(),
                item2: names[j].clone(),
                score,
            })
            .collect();

        tracing::debug!(
            distinct = names.len(),
            pairs = pair_count(names.len()),
            matches = matches.len(),
            "name sweep finished"
        );
        matches
    }

    /// 説明文の類似ペアを抽出
    ///
    /// 説明文かラベルが欠損している行は除外する。
    /// 行インデックス i < j の全ペアを (i, j) の辞書順で評価する。
    pub fn filter_by_description<I, D, L>(&self, records: I) -> Vec<DescriptionMatch>
    where
        I: IntoIterator<Item = (Option<D>, Option<L>)>,
        D: AsRef<str>,
        L: AsRef<str>,
    {
        let rows: Vec<DescriptionRecord> = records
            .into_iter()
            .filter_map(|(description, label)| DescriptionRecord::from_optional(description, label))
            .collect();
        self.filter_description_records(&rows)
    }

    /// 正規化済みの行から説明文の類似ペアを抽出
    pub fn filter_description_records(&self, rows: &[DescriptionRecord]) -> Vec<DescriptionMatch> {
        let texts: Vec<&str> = rows.iter().map(|r| r.description.as_str()).collect();

        let matches: Vec<DescriptionMatch> = self
            .sweep(&texts)
            .into_iter()
            .map(|(i, j, score)| DescriptionMatch {
                description1: rows[i].description.clone(),
                description2: rows[j].description.clone(),
                label1: rows[i].label.clone(),
                label2: rows[j].label.clone(),
                score,
            })
            .collect();

        tracing::debug!(
            rows = rows.len(),
            pairs = pair_count(rows.len()),
            matches = matches.len(),
            "description sweep finished"
        );
        matches
    }

    /// i < j の全ペアを評価し、閾値を超えた (i, j, score) を返す
    fn sweep(&self, texts: &[&str]) -> Vec<(usize, usize, u8)> {
        let n = texts.len();
        let total = pair_count(n);
        // 並列時も通知値が減らないよう加算と通知をまとめて直列化
        let done = Mutex::new(0u64);

        let row = |i: usize| {
            let left = texts[i];
            let hits: Vec<(usize, usize, u8)> = ((i + 1)..n)
                .filter_map(|j| {
                    let score = self
                        .scorer
                        .score(left, texts[j], self.vocabulary, &self.options.weights);
                    self.options.passes(score).then_some((i, j, score))
                })
                .collect();

            if let Some(progress) = &self.progress {
                let mut scored = done.lock().unwrap_or_else(PoisonError::into_inner);
                *scored += (n - i - 1) as u64;
                progress(*scored, total);
            }
            hits
        };

        if self.options.parallel {
            (0..n).into_par_iter().flat_map_iter(row).collect()
        } else {
            (0..n).flat_map(row).collect()
        }
    }
}

/// ブランド名を正規化（欠損除外・trim）し、初出順に重複を除去
fn distinct_names<I, T>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<T>>,
    T: AsRef<str>,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .flatten()
        .map(|name| name.as_ref().trim().to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// 既定スコアラでブランド名の類似ペアを抽出
pub fn filter_by_name<I, T>(records: I, vocabulary: &Vocabulary, options: &FilterOptions) -> Vec<NameMatch>
where
    I: IntoIterator<Item = Option<T>>,
    T: AsRef<str>,
{
    PairwiseFilter::new(vocabulary)
        .with_options(*options)
        .filter_by_name(records)
}

/// 既定スコアラで説明文の類似ペアを抽出
pub fn filter_by_description<I, D, L>(
    records: I,
    vocabulary: &Vocabulary,
    options: &FilterOptions,
) -> Vec<DescriptionMatch>
where
    I: IntoIterator<Item = (Option<D>, Option<L>)>,
    D: AsRef<str>,
    L: AsRef<str>,
{
    PairwiseFilter::new(vocabulary)
        .with_options(*options)
        .filter_by_description(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::weighted_score;

    fn vocab() -> Vocabulary {
        Vocabulary::from_words(["co", "inc", "the", "foods", "company"])
    }

    fn options(threshold: f64) -> FilterOptions {
        FilterOptions {
            threshold,
            ..Default::default()
        }
    }

    /// 全インデックス対を走査し、ソート済みペアで重複を弾く素朴な実装
    fn reference_filter_by_name(names: &[&str], vocabulary: &Vocabulary, threshold: f64) -> Vec<(String, String, u8)> {
        let names: Vec<String> = names.iter().map(|n| n.trim().to_string()).collect();
        let weights = TokenWeights::default();
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (i, a) in names.iter().enumerate() {
            for (j, b) in names.iter().enumerate() {
                if i == j || a == b {
                    continue;
                }
                let pair = if a < b { (a.clone(), b.clone()) } else { (b.clone(), a.clone()) };
                if !seen.insert(pair) {
                    continue;
                }
                let score = weighted_score(a, b, vocabulary, &weights);
                if f64::from(score) > threshold {
                    out.push((a.clone(), b.clone(), score));
                }
            }
        }
        out
    }

    #[test]
    fn test_name_scenario() {
        let vocab = Vocabulary::from_words(["co", "inc"]);
        let records = vec![Some("acme co"), Some("acme inc"), Some("acme co")];
        let matches = filter_by_name(records, &vocab, &options(40.0));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].as_tuple(), ("acme co", "acme inc", 50));
    }

    #[test]
    fn test_name_drops_missing_and_trims() {
        let records = vec![None, Some("  acme co "), None, Some("acme co")];
        let matches = filter_by_name(records, &vocab(), &options(0.0));
        // trim後は同一文字列なのでペアにならない
        assert!(matches.is_empty());
    }

    #[test]
    fn test_name_threshold_is_exclusive() {
        let vocab = Vocabulary::from_words(["co", "inc"]);
        let records = vec![Some("acme co"), Some("acme inc")];
        assert!(filter_by_name(records.clone(), &vocab, &options(50.0)).is_empty());
        assert_eq!(filter_by_name(records, &vocab, &options(49.0)).len(), 1);
    }

    #[test]
    fn test_name_no_self_or_duplicate_pairs() {
        let records: Vec<Option<&str>> = vec![
            Some("acme"),
            Some("acme co"),
            Some("acme"),
            Some("acme inc"),
            Some("acme co"),
            Some("acme the"),
        ];
        let matches = filter_by_name(records, &vocab(), &options(0.0));

        let mut unordered = HashSet::new();
        for m in &matches {
            assert_ne!(m.item1, m.item2);
            let key = if m.item1 < m.item2 {
                (m.item1.clone(), m.item2.clone())
            } else {
                (m.item2.clone(), m.item1.clone())
            };
            assert!(unordered.insert(key), "重複ペア: {:?}", m);
        }
        // 4種類の値 → 6ペア
        assert_eq!(matches.len(), 6);
    }

    #[test]
    fn test_name_matches_reference_enumeration() {
        let inputs: Vec<Vec<&str>> = vec![
            vec!["zeta foods", "acme co", "zeta foods inc", "acme", "acme co", "the zeta"],
            vec!["b", "a", "b a", "a b", "a", "c"],
            vec!["acme", "acme", "acme"],
            vec![],
            vec!["  spaced  ", "spaced", "other spaced"],
        ];
        for names in inputs {
            for threshold in [0.0, 30.0, 60.0] {
                let expected = reference_filter_by_name(&names, &vocab(), threshold);
                let actual: Vec<(String, String, u8)> =
                    filter_by_name(names.iter().map(|n| Some(*n)), &vocab(), &options(threshold))
                        .into_iter()
                        .map(Into::into)
                        .collect();
                assert_eq!(actual, expected, "入力: {:?} 閾値: {}", names, threshold);
            }
        }
    }

    #[test]
    fn test_description_scores_identical_rows() {
        let records = vec![
            (Some("organic green tea"), Some("leafy")),
            (Some("organic green tea"), Some("leafy inc")),
        ];
        let matches = filter_by_description(records, &vocab(), &options(70.0));
        assert_eq!(matches.len(), 1);
        assert_eq!(
            matches[0].as_tuple(),
            ("organic green tea", "organic green tea", "leafy", "leafy inc", 100)
        );
    }

    #[test]
    fn test_description_drops_incomplete_rows_and_orders_by_index() {
        let records = vec![
            (Some("acme foods"), Some("a")),
            (None, Some("skip")),
            (Some("acme foods co"), Some("b")),
            (Some("acme foods"), None),
            (Some("acme foods"), Some("c")),
        ];
        let matches = filter_by_description(records, &vocab(), &options(60.0));
        let labels: Vec<(&str, &str)> = matches
            .iter()
            .map(|m| (m.label1.as_str(), m.label2.as_str()))
            .collect();
        assert_eq!(labels, vec![("a", "b"), ("a", "c"), ("b", "c")]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let names: Vec<Option<String>> = (0..60)
            .map(|i| Some(format!("brand{} foods co {}", i % 7, i % 3)))
            .collect();
        let sequential = filter_by_name(names.clone(), &vocab(), &options(30.0));
        let parallel = filter_by_name(
            names.clone(),
            &vocab(),
            &FilterOptions {
                parallel: true,
                ..options(30.0)
            },
        );
        assert!(!sequential.is_empty());
        assert_eq!(sequential, parallel);

        let rows: Vec<(Option<String>, Option<String>)> = names
            .into_iter()
            .enumerate()
            .map(|(i, n)| (n, Some(format!("label{}", i))))
            .collect();
        let sequential = filter_by_description(rows.clone(), &vocab(), &options(30.0));
        let parallel = filter_by_description(
            rows,
            &vocab(),
            &FilterOptions {
                parallel: true,
                ..options(30.0)
            },
        );
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_custom_scorer() {
        let vocab = vocab();
        let filter = PairwiseFilter::new(&vocab)
            .with_options(options(10.0))
            .with_scorer(|a: &str, b: &str, _: &Vocabulary, _: &TokenWeights| -> u8 {
                if a.len() == b.len() { 100 } else { 0 }
            });
        let matches = filter.filter_by_name(vec![Some("abc"), Some("xyz"), Some("long name")]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].as_tuple(), ("abc", "xyz", 100));
    }

    #[test]
    fn test_progress_reaches_total() {
        let vocab = vocab();
        let last = Arc::new(Mutex::new((0u64, 0u64)));
        let sink = Arc::clone(&last);
        let filter = PairwiseFilter::new(&vocab).with_progress(move |done, total| {
            *sink.lock().unwrap() = (done, total);
        });
        filter.filter_by_description(vec![
            (Some("a"), Some("1")),
            (Some("b"), Some("2")),
            (Some("c"), Some("3")),
            (Some("d"), Some("4")),
        ]);
        assert_eq!(*last.lock().unwrap(), (6, 6));
    }

    #[test]
    fn test_parallel_progress_never_decreases() {
        let vocab = vocab();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let names: Vec<Option<String>> = (0..200).map(|i| Some(format!("brand{} foods", i))).collect();

        PairwiseFilter::new(&vocab)
            .with_options(FilterOptions {
                parallel: true,
                ..Default::default()
            })
            .with_progress(move |done, total| sink.lock().unwrap().push((done, total)))
            .filter_by_name(names);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 200);
        assert!(seen.windows(2).all(|w| w[0].0 <= w[1].0), "進捗が逆行した");
        assert_eq!(seen.last(), Some(&(pair_count(200), pair_count(200))));
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(100), 4950);
    }
}
