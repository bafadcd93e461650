use brand_dedup::common::{score_breakdown, weighted_score};
use brand_dedup::{cli, column_selector, config, error, export, loader, runner};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use export::{ReportMeta, SweepMode};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Names { column, sweep } => {
            println!("🔍 brand-dedup - ブランド名照合\n");

            // 1. 読み込み
            println!("[1/3] 表データを読み込み中...");
            let table = loader::load_table(&sweep.input, sweep.sheet.as_deref())?;
            let column = column_selector::resolve_column(
                &table,
                column.as_deref(),
                "ブランド名の列を選択してください",
                "--column",
            )?;
            let values = table.column(&column)?;
            println!("✔ {}行を読み込み（列: {}）\n", values.len(), column);

            // 2. 照合
            let options = runner::resolve_options(&config, &sweep)?;
            let vocabulary = runner::build_vocabulary(&config, sweep.word_list.as_deref())?;
            println!("[2/3] 照合中...（閾値: {}）", options.threshold);
            let record_count = values.len();
            let matches = runner::run_name_sweep(values, &vocabulary, options);
            println!("✔ {}件の候補ペア\n", matches.len());

            // 3. 出力
            println!("[3/3] 結果を出力中...");
            let meta = ReportMeta {
                mode: SweepMode::Names,
                source: Some(sweep.input.display().to_string()),
                options,
                record_count,
            };
            if let Some(path) = export::export_matches(&matches, &meta, sweep.format, sweep.output.as_deref())? {
                println!("✔ 結果を保存: {}", path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Descriptions { desc_column, label_column, sweep } => {
            println!("🔍 brand-dedup - 説明文照合\n");

            // 1. 読み込み
            println!("[1/3] 表データを読み込み中...");
            let table = loader::load_table(&sweep.input, sweep.sheet.as_deref())?;
            let desc_column = column_selector::resolve_column(
                &table,
                desc_column.as_deref(),
                "説明文の列を選択してください",
                "--desc-column",
            )?;
            let label_column = column_selector::resolve_column(
                &table,
                label_column.as_deref(),
                "ブランド名の列を選択してください",
                "--label-column",
            )?;
            let rows = table.column_pair(&desc_column, &label_column)?;
            println!(
                "✔ {}行を読み込み（説明文: {}, ブランド名: {}）\n",
                rows.len(),
                desc_column,
                label_column
            );

            // 2. 照合
            let options = runner::resolve_options(&config, &sweep)?;
            let vocabulary = runner::build_vocabulary(&config, sweep.word_list.as_deref())?;
            println!("[2/3] 照合中...（閾値: {}）", options.threshold);
            let record_count = rows.len();
            let matches = runner::run_description_sweep(rows, &vocabulary, options);
            println!("✔ {}件の候補ペア\n", matches.len());

            // 3. 出力
            println!("[3/3] 結果を出力中...");
            let meta = ReportMeta {
                mode: SweepMode::Descriptions,
                source: Some(sweep.input.display().to_string()),
                options,
                record_count,
            };
            if let Some(path) = export::export_matches(&matches, &meta, sweep.format, sweep.output.as_deref())? {
                println!("✔ 結果を保存: {}", path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Score { first, second, explain, weights, word_list } => {
            let weights = runner::resolve_weights(&config, &weights)?;
            let vocabulary = runner::build_vocabulary(&config, word_list.as_deref())?;

            if explain {
                let breakdown = score_breakdown(&first, &second, &vocabulary, &weights);
                println!("スコア: {}", breakdown.score);
                println!("  共通トークン: {}", breakdown.intersection.join(" "));
                println!("  全トークン: {}", breakdown.union.join(" "));
                for token in &breakdown.union {
                    let kind = if vocabulary.contains(token) { "一般語" } else { "ブランド語" };
                    println!("    {} ({}, 重み {})", token, kind, weights.weight_of(token, &vocabulary));
                }
                println!(
                    "  重み合計: {} / {}",
                    breakdown.weighted_intersection, breakdown.weighted_union
                );
            } else {
                println!("{}", weighted_score(&first, &second, &vocabulary, &weights));
            }
        }

        Commands::Columns { input, sheet } => {
            let table = loader::load_table(&input, sheet.as_deref())?;
            println!("列一覧（{}行）:", table.len());
            for (i, header) in table.headers().iter().enumerate() {
                println!("  {}) {}", i + 1, header);
            }
        }

        Commands::Config {
            show,
            set_threshold,
            set_brand_weight,
            set_common_weight,
            set_word_list,
            add_common_word,
            reset,
        } => {
            let mut config = if reset { Config::default() } else { config };
            let changed = reset
                || set_threshold.is_some()
                || set_brand_weight.is_some()
                || set_common_weight.is_some()
                || set_word_list.is_some()
                || !add_common_word.is_empty();

            if let Some(threshold) = set_threshold {
                config.threshold = threshold;
            }
            if let Some(weight) = set_brand_weight {
                config.brand_weight = weight;
            }
            if let Some(weight) = set_common_weight {
                config.common_weight = weight;
            }
            if let Some(path) = set_word_list {
                config.word_list = Some(path);
            }
            for word in &add_common_word {
                config.add_common_word(word);
            }

            if changed {
                // 保存前に重みを検証
                config.weights()?;
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  閾値: {}", config.threshold);
                println!("  ブランド語の重み: {}", config.brand_weight);
                println!("  一般語の重み: {}", config.common_weight);
                println!(
                    "  一般語リスト: {}",
                    config
                        .word_list_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "既定（組み込み + OS辞書）".into())
                );
                println!(
                    "  追加の一般語: {}",
                    if config.extra_common_words.is_empty() {
                        "なし".to_string()
                    } else {
                        config.extra_common_words.join(", ")
                    }
                );
                println!("  並列照合: {}", if config.parallel { "有効" } else { "無効" });
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
