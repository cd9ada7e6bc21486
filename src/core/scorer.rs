// File: src/core/scorer.rs
use crate::core::store::Model;
use crate::core::tokenizer::{frequency_table, Tokenizer};
use crate::error::{ClassifierError, Result};
use std::collections::BTreeMap;

/// Read-only view that scores documents against a model.
pub struct Scorer<'a> {
    model: &'a Model,
    tokenizer: &'a dyn Tokenizer,
}

impl<'a> Scorer<'a> {
    pub fn new(model: &'a Model, tokenizer: &'a dyn Tokenizer) -> Self {
        Self { model, tokenizer }
    }

    /// Laplace smoothed P(token | category).
    pub fn token_probability(&self, token: &str, category: &str) -> Result<f64> {
        if self.model.vocabulary_size() == 0 {
            return Err(ClassifierError::EmptyModel);
        }
        let (frequency, word_count) = self
            .model
            .category(category)
            .map(|stats| (stats.frequency_of(token), stats.word_count))
            .unwrap_or((0, 0));

        // Float arithmetic: loaded counters may sit near u64::MAX.
        let numerator = frequency as f64 + 1.0;
        let denominator = word_count as f64 + self.model.vocabulary_size() as f64;
        Ok(numerator / denominator)
    }

    /// Log score of every known category, in label order.
    pub fn scores(&self, text: &str) -> Result<Vec<(String, f64)>> {
        if self.model.is_empty() {
            return Err(ClassifierError::NoCategories);
        }
        if self.model.total_documents() == 0 || self.model.vocabulary_size() == 0 {
            return Err(ClassifierError::EmptyModel);
        }

        let tokens = self.tokenizer.tokenize(text);
        let table = frequency_table(&tokens);

        self.model
            .categories()
            .map(|(label, _)| Ok((label.to_string(), self.log_score(label, &table)?)))
            .collect()
    }

    /// Picks the highest scoring category. Ties go to the smallest label.
    pub fn categorize(&self, text: &str) -> Result<String> {
        let mut best: Option<(String, f64)> = None;
        // Scores arrive in ascending label order, so only a strictly better
        // score may replace the current pick.
        for (label, score) in self.scores(text)? {
            if best.as_ref().map_or(true, |(_, top)| score > *top) {
                best = Some((label, score));
            }
        }
        best.map(|(label, _)| label).ok_or(ClassifierError::NoCategories)
    }

    fn log_score(&self, label: &str, table: &BTreeMap<String, u64>) -> Result<f64> {
        let document_count = self
            .model
            .category(label)
            .map(|stats| stats.document_count)
            .unwrap_or(0);
        let prior = document_count as f64 / self.model.total_documents() as f64;

        let mut score = prior.ln();
        for (token, &frequency_in_text) in table {
            let probability = self.token_probability(token, label)?;
            tracing::trace!(
                category = label,
                token = token.as_str(),
                frequency_in_text,
                probability,
                "token likelihood"
            );
            score += frequency_in_text as f64 * probability.ln();
        }
        tracing::trace!(category = label, score, "category log score");
        Ok(score)
    }
}
