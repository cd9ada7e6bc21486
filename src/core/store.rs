// File: src/core/store.rs
use crate::core::types::{CategoryStats, Token};
use std::collections::{BTreeMap, HashSet};

/// The aggregate state of a classifier.
///
/// Categories are kept in a `BTreeMap` so that every walk over them is in
/// lexicographic label order. Counters only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    pub(crate) categories: BTreeMap<String, CategoryStats>,
    pub(crate) vocabulary: HashSet<Token>,
    pub(crate) vocabulary_size: u64,
    pub(crate) total_documents: u64,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty category. No-op when the label is already known.
    pub fn initialize_category(&mut self, label: &str) {
        if !self.categories.contains_key(label) {
            self.categories.insert(label.to_string(), CategoryStats::default());
        }
    }

    /// Counts one more training document for `label`.
    pub fn record_document(&mut self, label: &str) {
        self.initialize_category(label);
        if let Some(stats) = self.categories.get_mut(label) {
            stats.document_count = stats.document_count.saturating_add(1);
            self.total_documents = self.total_documents.saturating_add(1);
        }
    }

    /// Attributes `count` occurrences of `token` to `label`.
    /// Counters saturate instead of wrapping.
    /// Returns true when the token was new to the whole model.
    pub fn record_token(&mut self, label: &str, token: &str, count: u64) -> bool {
        self.initialize_category(label);
        if let Some(stats) = self.categories.get_mut(label) {
            let frequency = stats.word_frequency.entry(token.to_string()).or_insert(0);
            *frequency = frequency.saturating_add(count);
            stats.word_count = stats.word_count.saturating_add(count);
        }

        if self.vocabulary.contains(token) {
            return false;
        }
        self.vocabulary.insert(token.to_string());
        self.vocabulary_size += 1;
        true
    }

    pub fn set_last_suggestion(&mut self, label: &str, tokens: Vec<Token>) {
        self.initialize_category(label);
        if let Some(stats) = self.categories.get_mut(label) {
            stats.last_suggestion = tokens;
        }
    }

    pub fn total_documents(&self) -> u64 {
        self.total_documents
    }

    pub fn vocabulary_size(&self) -> u64 {
        self.vocabulary_size
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.vocabulary.contains(token)
    }

    /// Vocabulary in sorted order.
    pub fn vocabulary(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.vocabulary.iter().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }

    pub fn category(&self, label: &str) -> Option<&CategoryStats> {
        self.categories.get(label)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryStats)> {
        self.categories.iter().map(|(label, stats)| (label.as_str(), stats))
    }

    pub fn category_labels(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Verifies the bookkeeping invariants, describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.vocabulary_size != self.vocabulary.len() as u64 {
            return Err(format!(
                "vocabularySize is {} but vocabulary holds {} tokens",
                self.vocabulary_size,
                self.vocabulary.len()
            ));
        }

        let documents = checked_sum(self.categories.values().map(|s| s.document_count))
            .ok_or_else(|| "documentCount values overflow".to_string())?;
        if documents != self.total_documents {
            return Err(format!(
                "totalDocuments is {} but categories sum to {}",
                self.total_documents, documents
            ));
        }

        for (label, stats) in &self.categories {
            let words = checked_sum(stats.word_frequency.values().copied())
                .ok_or_else(|| format!("wordFrequency values for {label:?} overflow"))?;
            if words != stats.word_count {
                return Err(format!(
                    "wordCount for {label:?} is {} but frequencies sum to {words}",
                    stats.word_count
                ));
            }
            if let Some(token) = stats
                .word_frequency
                .keys()
                .find(|token| !self.vocabulary.contains(*token))
            {
                return Err(format!("token {token:?} of {label:?} is missing from vocabulary"));
            }
        }
        Ok(())
    }
}

fn checked_sum(mut values: impl Iterator<Item = u64>) -> Option<u64> {
    values.try_fold(0u64, u64::checked_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_category_is_idempotent() {
        let mut model = Model::new();
        model.initialize_category("spam");
        model.record_document("spam");
        model.initialize_category("spam");

        let stats = model.category("spam").unwrap();
        assert_eq!(stats.document_count, 1);
        assert_eq!(model.category_labels(), vec!["spam"]);
    }

    #[test]
    fn record_token_grows_vocabulary_once() {
        let mut model = Model::new();
        assert!(model.record_token("a", "cheap", 2));
        assert!(!model.record_token("b", "cheap", 1));
        assert!(!model.record_token("a", "cheap", 3));

        assert_eq!(model.vocabulary_size(), 1);
        assert_eq!(model.category("a").unwrap().frequency_of("cheap"), 5);
        assert_eq!(model.category("a").unwrap().word_count, 5);
        assert_eq!(model.category("b").unwrap().word_count, 1);
        assert!(model.check_invariants().is_ok());
    }

    #[test]
    fn check_invariants_reports_drift() {
        let mut model = Model::new();
        model.record_token("a", "x", 1);
        model.vocabulary_size = 3;
        assert!(model.check_invariants().is_err());

        let mut model = Model::new();
        model.record_document("a");
        model.total_documents = 0;
        assert!(model.check_invariants().is_err());
    }

    #[test]
    fn check_invariants_rejects_overflowing_sums() {
        let mut model = Model::new();
        model.record_token("a", "x", 1);
        model.record_token("a", "y", 1);
        let stats = model.categories.get_mut("a").unwrap();
        stats.word_frequency.insert("x".into(), u64::MAX);
        stats.word_count = 0;
        assert!(model.check_invariants().unwrap_err().contains("overflow"));
    }
}
