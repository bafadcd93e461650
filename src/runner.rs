//! 照合の実行モジュール
//!
//! 設定とコマンドライン引数から照合条件・ボキャブラリを組み立て、
//! 進捗バーを表示しながらペア照合を実行する。

use crate::cli::{SweepArgs, WeightArgs};
use crate::config::Config;
use crate::error::{DedupError, Result};
use brand_dedup_common::{
    DescriptionMatch, FilterOptions, NameMatch, PairwiseFilter, TokenWeights, Vocabulary,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::borrow::Cow;
use std::path::Path;
use std::time::Instant;

/// ボキャブラリを構築
///
/// 優先順: 引数の語リスト → 環境変数/設定の語リスト → 組み込みリスト。
/// 追加語がなく組み込みリストを使う場合はプロセス共有のものを借用する。
pub fn build_vocabulary(config: &Config, word_list: Option<&Path>) -> Result<Cow<'static, Vocabulary>> {
    let path = word_list.map(Path::to_path_buf).or_else(|| config.word_list_path());

    let vocabulary = match path {
        Some(path) => {
            if !path.exists() {
                return Err(DedupError::FileNotFound(path.display().to_string()));
            }
            Cow::Owned(Vocabulary::from_file(&path)?)
        }
        None => Cow::Borrowed(Vocabulary::global()),
    };

    let vocabulary = if config.extra_common_words.is_empty() {
        vocabulary
    } else {
        Cow::Owned(
            vocabulary
                .into_owned()
                .with_words(&config.extra_common_words),
        )
    };

    tracing::debug!(words = vocabulary.len(), "vocabulary ready");
    Ok(vocabulary)
}

/// 重みを決定（引数 → 設定）
pub fn resolve_weights(config: &Config, args: &WeightArgs) -> Result<TokenWeights> {
    Ok(TokenWeights::new(
        args.brand_weight.unwrap_or(config.brand_weight),
        args.common_weight.unwrap_or(config.common_weight),
    )?)
}

/// 照合条件を決定（引数 → 設定）
pub fn resolve_options(config: &Config, args: &SweepArgs) -> Result<FilterOptions> {
    let threshold = args.threshold.unwrap_or(config.threshold);
    if threshold.is_nan() {
        return Err(DedupError::Config("閾値が不正です".into()));
    }

    Ok(FilterOptions {
        threshold,
        weights: resolve_weights(config, &args.weights)?,
        parallel: args.parallel || config.parallel,
    })
}

/// ブランド名の照合を実行
pub fn run_name_sweep(
    values: Vec<Option<String>>,
    vocabulary: &Vocabulary,
    options: FilterOptions,
) -> Vec<NameMatch> {
    let started = Instant::now();
    let progress = progress_bar();
    let bar = progress.clone();

    let matches = PairwiseFilter::new(vocabulary)
        .with_options(options)
        .with_progress(move |done, total| update_progress(&bar, done, total))
        .filter_by_name(values);

    progress.finish_and_clear();
    tracing::info!(matches = matches.len(), elapsed_ms = started.elapsed().as_millis() as u64, "name sweep done");
    matches
}

/// 説明文の照合を実行
pub fn run_description_sweep(
    rows: Vec<(Option<String>, Option<String>)>,
    vocabulary: &Vocabulary,
    options: FilterOptions,
) -> Vec<DescriptionMatch> {
    let started = Instant::now();
    let progress = progress_bar();
    let bar = progress.clone();

    let matches = PairwiseFilter::new(vocabulary)
        .with_options(options)
        .with_progress(move |done, total| update_progress(&bar, done, total))
        .filter_by_description(rows);

    progress.finish_and_clear();
    tracing::info!(matches = matches.len(), elapsed_ms = started.elapsed().as_millis() as u64, "description sweep done");
    matches
}

fn progress_bar() -> ProgressBar {
    let progress = ProgressBar::new(0);
    let style = ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} ペア ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    progress.set_style(style);
    progress
}

fn update_progress(bar: &ProgressBar, done: u64, total: u64) {
    if bar.length() != Some(total) {
        bar.set_length(total);
    }
    bar.set_position(done);
}
