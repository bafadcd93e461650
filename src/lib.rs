//! brand-dedup
//!
//! 表データ（CSV/Excel）からブランド名・説明文の重複候補を抽出するCLIのライブラリ部分

pub mod cli;
pub mod column_selector;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod runner;

pub use brand_dedup_common as common;
