use crate::error::{DedupError, Result};
use brand_dedup_common::{TokenWeights, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 語リストのパスを上書きする環境変数
pub const WORD_LIST_ENV: &str = "BRAND_DEDUP_WORD_LIST";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub threshold: f64,
    pub brand_weight: f64,
    pub common_weight: f64,
    /// 一般語リスト（1行1語）。未設定なら組み込みリスト
    pub word_list: Option<PathBuf>,
    /// 一般語として追加する語
    pub extra_common_words: Vec<String>,
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        let weights = TokenWeights::default();
        Self {
            threshold: DEFAULT_THRESHOLD,
            brand_weight: weights.brand_weight,
            common_weight: weights.common_weight,
            word_list: None,
            extra_common_words: Vec::new(),
            parallel: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DedupError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("brand-dedup").join("config.json"))
    }

    /// 語リストのパス（環境変数を優先）
    pub fn word_list_path(&self) -> Option<PathBuf> {
        match std::env::var(WORD_LIST_ENV) {
            Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => self.word_list.clone(),
        }
    }

    pub fn weights(&self) -> Result<TokenWeights> {
        Ok(TokenWeights::new(self.brand_weight, self.common_weight)?)
    }

    pub fn add_common_word(&mut self, word: &str) {
        let word = word.trim().to_lowercase();
        if !word.is_empty() && !self.extra_common_words.contains(&word) {
            self.extra_common_words.push(word);
        }
    }
}
