use thiserror::Error;

#[derive(Error, Debug)]
pub enum DedupError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応の入力形式です: {0}（csv/tsv/txt/xlsx/xlsm/xls/xlsb/ods）")]
    UnsupportedInput(String),

    #[error("列 '{column}' が見つかりません（利用可能な列: {}）", available.join(", "))]
    ColumnNotFound { column: String, available: Vec<String> },

    #[error("シート '{0}' が見つかりません")]
    SheetNotFound(String),

    #[error("表データが空です: {0}")]
    EmptyTable(String),

    #[error("CSV読み込みエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("スプレッドシート読み込みエラー: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] brand_dedup_common::Error),
}

pub type Result<T> = std::result::Result<T, DedupError>;
