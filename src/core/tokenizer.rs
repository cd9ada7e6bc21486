// File: src/core/tokenizer.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Turns raw text into an ordered sequence of tokens.
/// Training and scoring only see tokens, so policies can be swapped freely.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;

    fn name(&self) -> &str;
}

const SEPARATORS: [char; 11] = [',', '[', ']', '\n', '\r', '.', '!', ':', '?', '@', '#'];

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, ' ' | '+' | '-' | '*' | '=' | '(' | ')' | ',' | '.' | ':' | '!' | '_')
}

/// Allow-list filter, split on separators, trim each piece.
///
/// Empty pieces are kept and count as a real token, so `"a,,b"` yields
/// `["a", "", "b"]` and `""` yields `[""]`. This departs from the older
/// classifier this format comes from, which dropped empty pieces between
/// separators; keeping them changes `vocabularySize` and smoothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTokenizer;

impl Tokenizer for DefaultTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let filtered: String = text.chars().filter(|&c| is_allowed(c)).collect();
        filtered
            .split(|c: char| SEPARATORS.contains(&c))
            .map(|piece| piece.trim().to_string())
            .collect()
    }

    fn name(&self) -> &str {
        "default"
    }
}

/// Splits on Unicode whitespace only. No filtering, no empty tokens.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn name(&self) -> &str {
        "whitespace"
    }
}

/// Selects a built-in tokenizer from configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    #[default]
    Default,
    Whitespace,
}

impl TokenizerKind {
    pub fn build(self) -> Box<dyn Tokenizer> {
        match self {
            TokenizerKind::Default => Box::new(DefaultTokenizer),
            TokenizerKind::Whitespace => Box::new(WhitespaceTokenizer),
        }
    }
}

/// Counts each distinct token of a single document.
/// Ordered so that anything summed over it is summed in the same order every time.
pub fn frequency_table(tokens: &[String]) -> BTreeMap<String, u64> {
    let mut table = BTreeMap::new();
    for token in tokens {
        *table.entry(token.clone()).or_insert(0) += 1;
    }
    table
}
