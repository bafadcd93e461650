//! 一般語ボキャブラリモジュール
//!
//! 類似度計算で「一般語」とみなす単語の集合を管理する。
//! ボキャブラリに含まれないトークンはブランド固有語として重く評価される。
//!
//! 構築後は不変。プロセス全体で1つを共有する想定。

use crate::error::Result;
use lazy_static::lazy_static;
use std::collections::HashSet;
use std::path::Path;

/// ブランド名に頻出するため一般語として扱う短い語
pub const EXTENSION_WORDS: &[&str] = &["johnson", "co", "dr", "wd"];

/// 組み込みの一般語リスト
const BUILTIN_WORD_LIST: &str = include_str!("../data/common_words.txt");

/// OS付属の英単語辞書（見つかった最初の1つを使う）
pub const SYSTEM_DICTIONARY_PATHS: &[&str] = &["/usr/share/dict/words", "/usr/dict/words"];

lazy_static! {
    static ref DEFAULT_VOCABULARY: Vocabulary = Vocabulary::standard();
}

/// 一般語の集合（小文字）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    words: HashSet<String>,
}

impl Vocabulary {
    /// 基本語リストから構築（拡張語を追加）
    pub fn new<I, S>(base_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self::from_words(base_words);
        vocabulary
            .words
            .extend(EXTENSION_WORDS.iter().map(|w| w.to_string()));
        vocabulary
    }

    /// 指定した語だけで構築（拡張語は追加しない）
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// 組み込み語リスト + 拡張語
    pub fn builtin() -> Self {
        Self::from_word_list_str(BUILTIN_WORD_LIST)
    }

    /// 組み込み語リスト + OS付属の英単語辞書（あれば）
    pub fn standard() -> Self {
        Self::builtin().with_system_dictionary(SYSTEM_DICTIONARY_PATHS.iter().map(Path::new))
    }

    /// 候補パスのうち最初に読めた辞書ファイルの語を加える
    ///
    /// 辞書は1行1語。大文字は小文字に揃える。どれも読めなければそのまま返す。
    pub fn with_system_dictionary<'p, I>(self, candidates: I) -> Self
    where
        I: IntoIterator<Item = &'p Path>,
    {
        for path in candidates {
            let Ok(bytes) = std::fs::read(path) else {
                continue;
            };
            // Latin-1の辞書もあるので不正なバイトは置換して読む
            let content = String::from_utf8_lossy(&bytes);
            let vocabulary = self.with_words(parse_word_list(&content));
            tracing::debug!(
                path = %path.display(),
                words = vocabulary.len(),
                "merged system dictionary"
            );
            return vocabulary;
        }
        tracing::debug!("no system dictionary found, using built-in word list");
        self
    }

    /// プロセス全体で共有される既定ボキャブラリ
    pub fn global() -> &'static Vocabulary {
        &DEFAULT_VOCABULARY
    }

    /// 語リスト文字列（1行1語）から構築
    ///
    /// 空行と `#` で始まる行は無視する。
    pub fn from_word_list_str(content: &str) -> Self {
        Self::new(parse_word_list(content))
    }

    /// 語リストファイルから構築
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let vocabulary = Self::from_word_list_str(&content);
        tracing::debug!(
            path = %path.display(),
            words = vocabulary.len(),
            "loaded word list"
        );
        Ok(vocabulary)
    }

    /// 追加の一般語を加えたボキャブラリを返す
    pub fn with_words<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            extra
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    /// トークンが一般語かどうか
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_words(iter)
    }
}

fn parse_word_list(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}
