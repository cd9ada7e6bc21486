// src/core/types.rs
use std::collections::HashMap;

/// A token produced by a tokenizer.
pub type Token = String;

/// Everything the model knows about one category label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryStats {
    /// Number of training documents assigned to this category.
    pub document_count: u64,
    /// Token occurrences attributed to this category, repetitions included.
    pub word_count: u64,
    pub word_frequency: HashMap<Token, u64>,
    /// Tokens of the most recently learned document. Overwritten on each learn.
    pub last_suggestion: Vec<Token>,
}

impl CategoryStats {
    pub fn frequency_of(&self, token: &str) -> u64 {
        self.word_frequency.get(token).copied().unwrap_or(0)
    }
}
