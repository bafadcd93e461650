use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brand-dedup")]
#[command(about = "ブランド名・説明文の重複候補抽出ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ブランド名の類似ペアを抽出
    Names {
        /// ブランド名の列（省略時は対話選択）
        #[arg(short, long)]
        column: Option<String>,

        #[command(flatten)]
        sweep: SweepArgs,
    },

    /// 説明文の類似ペアを抽出
    Descriptions {
        /// 説明文の列（省略時は対話選択）
        #[arg(short = 'd', long)]
        desc_column: Option<String>,

        /// ブランド名の列（省略時は対話選択）
        #[arg(short = 'l', long)]
        label_column: Option<String>,

        #[command(flatten)]
        sweep: SweepArgs,
    },

    /// 2つの文字列のスコアを計算
    Score {
        /// 文字列1（小文字化・クリーニング済み）
        #[arg(required = true)]
        first: String,

        /// 文字列2（小文字化・クリーニング済み）
        #[arg(required = true)]
        second: String,

        /// 内訳を表示
        #[arg(long)]
        explain: bool,

        #[command(flatten)]
        weights: WeightArgs,

        /// 一般語リストファイル（1行1語）
        #[arg(long)]
        word_list: Option<PathBuf>,
    },

    /// 入力ファイルの列一覧を表示
    Columns {
        /// 入力ファイル（csv/tsv/xlsx/xls/ods）
        #[arg(required = true)]
        input: PathBuf,

        /// シート名（Excel系のみ、省略時は先頭シート）
        #[arg(long)]
        sheet: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定の閾値を設定
        #[arg(long)]
        set_threshold: Option<f64>,

        /// 既定のブランド語の重みを設定
        #[arg(long)]
        set_brand_weight: Option<f64>,

        /// 既定の一般語の重みを設定
        #[arg(long)]
        set_common_weight: Option<f64>,

        /// 一般語リストファイルを設定
        #[arg(long)]
        set_word_list: Option<PathBuf>,

        /// 一般語を追加（複数指定可）
        #[arg(long)]
        add_common_word: Vec<String>,

        /// 設定を初期値に戻す
        #[arg(long)]
        reset: bool,
    },
}

/// 照合系サブコマンド共通の引数
#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    /// 入力ファイル（csv/tsv/xlsx/xls/ods）
    #[arg(required = true)]
    pub input: PathBuf,

    /// シート名（Excel系のみ、省略時は先頭シート）
    #[arg(long)]
    pub sheet: Option<String>,

    /// 閾値（このスコアを超えたペアを出力、デフォルト70）
    #[arg(short, long)]
    pub threshold: Option<f64>,

    #[command(flatten)]
    pub weights: WeightArgs,

    /// 一般語リストファイル（1行1語）
    #[arg(long)]
    pub word_list: Option<PathBuf>,

    /// 出力形式 (table/json/csv/excel)
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// 出力ファイル/ディレクトリ
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 並列で照合
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WeightArgs {
    /// ブランド語（一般語リストにない語）の重み（デフォルト2.0）
    #[arg(long)]
    pub brand_weight: Option<f64>,

    /// 一般語の重み（デフォルト1.0）
    #[arg(long)]
    pub common_weight: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
    Excel,
}

impl OutputFormat {
    /// 出力ファイルの拡張子
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Table => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Excel => "xlsx",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" | "txt" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "excel" | "xlsx" => Ok(OutputFormat::Excel),
            _ => Err(format!("Unknown format: {}. Use table, json, csv, or excel", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Excel => write!(f, "excel"),
        }
    }
}
