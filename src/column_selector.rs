//! 列の対話式選択モジュール

use crate::error::{DedupError, Result};
use crate::loader::Table;
use dialoguer::Select;
use std::io::IsTerminal;

/// 照合対象の列名を決定
///
/// 指定があればその列の存在を確認する。
/// 指定がなく端末から実行されていれば一覧から選択させる。
///
/// # Arguments
/// * `table` - 読み込んだ表
/// * `given` - コマンドラインで指定された列名
/// * `prompt` - 対話選択時のプロンプト
/// * `flag` - 指定漏れ時のエラーメッセージに出すオプション名
pub fn resolve_column(table: &Table, given: Option<&str>, prompt: &str, flag: &str) -> Result<String> {
    if let Some(name) = given {
        let index = table.column_index(name)?;
        return Ok(table.headers()[index].clone());
    }

    if !std::io::stdin().is_terminal() {
        return Err(DedupError::Config(format!(
            "列が指定されていません。{} で指定してください（利用可能な列: {}）",
            flag,
            table.headers().join(", ")
        )));
    }

    select_column_interactive(table.headers(), prompt)
}

/// 対話式で列を選択
fn select_column_interactive(headers: &[String], prompt: &str) -> Result<String> {
    if headers.is_empty() {
        return Err(DedupError::EmptyTable("見出し行がありません".into()));
    }

    let index = Select::new()
        .with_prompt(prompt)
        .items(headers)
        .default(0)
        .interact()
        .map_err(|e| DedupError::Prompt(e.to_string()))?;

    println!("→ {} を使用", headers[index]);
    Ok(headers[index].clone())
}
