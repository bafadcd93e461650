//! 照合ロジックの統合テスト
//!
//! スコアの性質（範囲・対称性・自己類似）とペア抽出の性質を検証

use brand_dedup::common::{
    filter_by_description, filter_by_name, weighted_score, FilterOptions, PairwiseFilter,
    TokenWeights, Vocabulary,
};
use std::collections::HashSet;

const SAMPLES: &[&str] = &[
    "",
    "   ",
    "acme",
    "acme co",
    "acme inc",
    "the acme company",
    "johnson and johnson",
    "johnson johnson co",
    "zeta foods",
    "zeta organic foods inc",
    "dr pepper",
    "dr brown natural",
    "wd 40",
    "wd forty co",
];

fn vocab() -> Vocabulary {
    Vocabulary::new(["and", "the", "company", "foods", "organic", "natural", "brown", "forty", "inc"])
}

fn options(threshold: f64) -> FilterOptions {
    FilterOptions {
        threshold,
        ..Default::default()
    }
}

/// スコアは常に0〜100
#[test]
fn test_score_range() {
    let vocab = vocab();
    for weights in [
        TokenWeights::default(),
        TokenWeights::new(0.0, 1.0).unwrap(),
        TokenWeights::new(10.0, 0.1).unwrap(),
    ] {
        for a in SAMPLES {
            for b in SAMPLES {
                let score = weighted_score(a, b, &vocab, &weights);
                assert!(score <= 100, "{:?} / {:?} → {}", a, b, score);
            }
        }
    }
}

/// 引数の順序によらず同じスコア
#[test]
fn test_score_symmetry() {
    let vocab = vocab();
    let weights = TokenWeights::default();
    for a in SAMPLES {
        for b in SAMPLES {
            assert_eq!(
                weighted_score(a, b, &vocab, &weights),
                weighted_score(b, a, &vocab, &weights),
                "{:?} / {:?}",
                a,
                b
            );
        }
    }
}

/// 空文字列は常に0、空でない文字列どうしの自己比較は100
#[test]
fn test_empty_and_self_similarity() {
    let vocab = vocab();
    let weights = TokenWeights::default();
    assert_eq!(weighted_score("", "", &vocab, &weights), 0);
    assert_eq!(weighted_score("", "anything", &vocab, &weights), 0);
    for s in SAMPLES.iter().filter(|s| !s.trim().is_empty()) {
        assert_eq!(weighted_score(s, s, &vocab, &weights), 100, "{:?}", s);
    }
}

/// 拡張語（johnson/co/dr/wd）は一般語として扱われる
#[test]
fn test_extension_words_are_common() {
    let vocab = vocab();
    let weights = TokenWeights::default();
    // 共通は johnson(1) + co(1)、和集合は johnson(1) + co(1) + acme(2) = 4
    assert_eq!(weighted_score("johnson co", "acme johnson co", &vocab, &weights), 50);
}

/// 仕様例: acme co / acme inc
#[test]
fn test_acme_scenarios() {
    let vocab = Vocabulary::from_words(["co", "inc"]);
    assert_eq!(
        weighted_score("acme co", "acme inc", &vocab, &TokenWeights::default()),
        50
    );

    let matches = filter_by_name(
        vec![Some("acme co"), Some("acme inc"), Some("acme co")],
        &vocab,
        &options(40.0),
    );
    let tuples: Vec<(String, String, u8)> = matches.into_iter().map(Into::into).collect();
    assert_eq!(tuples, vec![("acme co".to_string(), "acme inc".to_string(), 50)]);
}

/// 同一文字列のペア・順序違いの重複ペアを返さない
#[test]
fn test_name_filter_pair_properties() {
    let vocab = vocab();
    let records: Vec<Option<&str>> = SAMPLES
        .iter()
        .chain(SAMPLES.iter().rev())
        .map(|s| Some(*s))
        .collect();
    let matches = filter_by_name(records, &vocab, &options(-1.0));

    let mut seen = HashSet::new();
    for m in &matches {
        assert_ne!(m.item1, m.item2);
        let mut key = [m.item1.clone(), m.item2.clone()];
        key.sort();
        assert!(seen.insert(key), "重複ペア: {:?}", m);
    }

    // trim後の異なる値は "" を含めて13種類 → 全ペア
    assert_eq!(matches.len(), 13 * 12 / 2);
}

/// 閾値ちょうどのスコアは除外
#[test]
fn test_threshold_exclusive() {
    let vocab = Vocabulary::from_words(["co", "inc"]);
    let records = || vec![Some("acme co"), Some("acme inc")];
    assert!(filter_by_name(records(), &vocab, &options(50.0)).is_empty());
    assert_eq!(filter_by_name(records(), &vocab, &options(49.5)).len(), 1);

    let rows = || vec![(Some("acme co"), Some("a")), (Some("acme inc"), Some("b"))];
    assert!(filter_by_description(rows(), &vocab, &options(50.0)).is_empty());
    assert_eq!(filter_by_description(rows(), &vocab, &options(49.0)).len(), 1);
}

/// 説明文は同一文字列の行どうしも比較し、(i, j) の順に返す
#[test]
fn test_description_filter_order() {
    let vocab = vocab();
    let rows = vec![
        (Some("zeta organic foods"), Some("zeta")),
        (Some("zeta organic foods"), Some("zeta inc")),
        (None, Some("missing")),
        (Some("acme rockets"), Some("acme")),
        (Some(" zeta organic foods "), Some("zeta co")),
    ];
    let matches = filter_by_description(rows, &vocab, &options(70.0));
    let labels: Vec<(&str, &str, u8)> = matches
        .iter()
        .map(|m| (m.label1.as_str(), m.label2.as_str(), m.score))
        .collect();
    assert_eq!(
        labels,
        vec![("zeta", "zeta inc", 100), ("zeta", "zeta co", 100), ("zeta inc", "zeta co", 100)]
    );
}

/// 並列実行でも逐次と同じ結果・順序
#[test]
fn test_parallel_equivalence() {
    let vocab = vocab();
    let records: Vec<Option<String>> = (0..120)
        .map(|i| {
            if i % 11 == 0 {
                None
            } else {
                Some(format!("brand{} organic foods {}", i % 9, i % 4))
            }
        })
        .collect();

    let sequential = PairwiseFilter::new(&vocab)
        .with_options(options(40.0))
        .filter_by_name(records.clone());
    let parallel = PairwiseFilter::new(&vocab)
        .with_options(FilterOptions {
            parallel: true,
            ..options(40.0)
        })
        .filter_by_name(records);

    assert!(!sequential.is_empty());
    assert_eq!(sequential, parallel);
}

/// 既定ボキャブラリでは一般的な英単語は一般語として扱われる
#[test]
fn test_default_vocabulary_treats_dictionary_words_as_common() {
    let vocab = Vocabulary::global();
    let weights = TokenWeights::default();
    // fresh / milk / juice はすべて一般語（重み1）→ 1 / 3
    assert_eq!(weighted_score("fresh milk", "fresh juice", vocab, &weights), 33);
    // 社名の接尾辞も一般語
    assert_eq!(weighted_score("zqxmart ltd", "zqxmart llc", vocab, &weights), 50);
}
