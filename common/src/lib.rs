//! Brand Dedup Common Library
//!
//! ブランド名・説明文の重複候補を重み付きJaccard類似度で抽出するコア部分

pub mod error;
pub mod export;
pub mod filter;
pub mod scorer;
pub mod types;
pub mod vocabulary;

pub use error::{Error, Result};
pub use filter::{
    filter_by_description, filter_by_name, pair_count, FilterOptions, PairwiseFilter,
    DEFAULT_THRESHOLD,
};
pub use scorer::{score_breakdown, weighted_score, ScoreBreakdown, Scorer, TokenWeights, WeightedJaccard};
pub use types::{DescriptionMatch, DescriptionRecord, NameMatch};
pub use vocabulary::{Vocabulary, EXTENSION_WORDS, SYSTEM_DICTIONARY_PATHS};
