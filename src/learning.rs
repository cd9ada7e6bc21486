// File: src/learning.rs
use crate::core::store::Model;
use crate::core::tokenizer::{frequency_table, Tokenizer};

#[derive(Debug, Default, Clone, Copy)]
pub struct LearningEngine;

impl LearningEngine {
    pub fn new() -> Self {
        Self
    }

    /// Applies one labeled document to the model.
    pub fn learn(&self, model: &mut Model, tokenizer: &dyn Tokenizer, text: &str, category: &str) {
        model.initialize_category(category);
        model.record_document(category);

        let tokens = tokenizer.tokenize(text);
        let table = frequency_table(&tokens);

        let mut new_tokens = 0usize;
        for (token, frequency_in_text) in &table {
            if model.record_token(category, token, *frequency_in_text) {
                new_tokens += 1;
            }
        }

        tracing::debug!(
            category,
            tokens = tokens.len(),
            distinct = table.len(),
            new_tokens,
            vocabulary_size = model.vocabulary_size(),
            "learned document"
        );

        model.set_last_suggestion(category, tokens);
    }
}

/// Derives a category label from an unordered set of keys.
///
/// Keys are sorted and deduplicated before hashing, so the result depends only
/// on which keys are present.
pub fn category_key<S: AsRef<str>>(keys: &[S]) -> String {
    let mut sorted: Vec<&str> = keys.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut hasher = blake3::Hasher::new();
    for key in sorted {
        hasher.update(&(key.len() as u64).to_le_bytes());
        hasher.update(key.as_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::DefaultTokenizer;

    #[test]
    fn learn_updates_counts_and_suggestion() {
        let mut model = Model::new();
        let engine = LearningEngine::new();
        engine.learn(&mut model, &DefaultTokenizer, "buy, buy, now", "spam");

        let stats = model.category("spam").unwrap();
        assert_eq!(stats.document_count, 1);
        assert_eq!(stats.frequency_of("buy"), 2);
        assert_eq!(stats.word_count, 3);
        assert_eq!(stats.last_suggestion, vec!["buy", "buy", "now"]);
        assert_eq!(model.total_documents(), 1);
        assert_eq!(model.vocabulary_size(), 2);
    }

    #[test]
    fn last_suggestion_is_overwritten() {
        let mut model = Model::new();
        let engine = LearningEngine::new();
        engine.learn(&mut model, &DefaultTokenizer, "first", "a");
        engine.learn(&mut model, &DefaultTokenizer, "second", "a");
        assert_eq!(model.category("a").unwrap().last_suggestion, vec!["second"]);
    }

    #[test]
    fn category_key_ignores_order_and_duplicates() {
        let a = category_key(&["red", "green", "blue"]);
        let b = category_key(&["blue", "red", "green", "red"]);
        assert_eq!(a, b);
        assert_ne!(a, category_key(&["red", "green"]));
        assert_ne!(category_key(&["ab", "c"]), category_key(&["a", "bc"]));
    }
}
