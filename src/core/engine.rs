use crate::core::scorer::Scorer;
use crate::core::store::Model;
use crate::core::tokenizer::{Tokenizer, TokenizerKind};
use crate::core::types::Token;
use crate::error::Result;
use crate::learning::{category_key, LearningEngine};
use crate::persistence::{decode, encode, load_from_disk, save_to_disk};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Settings for building a [`Classifier`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Where [`Classifier::save_state`] writes. Loaded on startup when present.
    pub state_path: Option<PathBuf>,
    pub tokenizer: TokenizerKind,
}

// The classifier owns the one model; learning mutates it and scoring borrows it.
pub struct Classifier {
    model: Model,
    tokenizer: Box<dyn Tokenizer>,
    learning_engine: LearningEngine,
    state_path: Option<PathBuf>,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("categories", &self.model.category_labels().len())
            .field("total_documents", &self.model.total_documents())
            .field("vocabulary_size", &self.model.vocabulary_size())
            .field("tokenizer", &self.tokenizer.name())
            .field("state_path", &self.state_path)
            .finish()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            model: Model::new(),
            tokenizer: TokenizerKind::Default.build(),
            learning_engine: LearningEngine::new(),
            state_path: None,
        }
    }

    /// Replaces the tokenization policy used by both learning and scoring.
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        let classifier = match &config.state_path {
            Some(path) => Self::from_file_or_new(path),
            None => Self::new(),
        };
        classifier.with_tokenizer(config.tokenizer.build())
    }

    /// Loads the state stored at `path`, or starts empty if it cannot be read.
    ///
    /// The path is remembered for [`Classifier::save_state`] only when the file
    /// was absent or loaded cleanly, so an unreadable file is never overwritten.
    pub fn from_file_or_new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut classifier = Self::new();
        if path.exists() {
            match load_from_disk(path) {
                Ok(model) => classifier.model = model,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "starting with an empty model; state file will not be overwritten"
                    );
                    return classifier;
                }
            }
        }
        classifier.state_path = Some(path.to_path_buf());
        classifier
    }

    /// Path that [`Classifier::save_state`] writes to, if any.
    pub fn state_path(&self) -> Option<&Path> {
        self.state_path.as_deref()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tokenizer.tokenize(text)
    }

    pub fn learn(&mut self, text: &str, category: &str) {
        self.learning_engine
            .learn(&mut self.model, self.tokenizer.as_ref(), text, category);
    }

    /// Learns `text` under a label derived from the key set, ignoring key order.
    pub fn learn_from_key_set<S: AsRef<str>>(&mut self, text: &str, keys: &[S]) {
        let category = category_key(keys);
        self.learn(text, &category);
    }

    pub fn categorize(&self, text: &str) -> Result<String> {
        self.scorer().categorize(text)
    }

    /// Log score of every category, in label order.
    pub fn scores(&self, text: &str) -> Result<Vec<(String, f64)>> {
        self.scorer().scores(text)
    }

    pub fn token_probability(&self, token: &str, category: &str) -> Result<f64> {
        self.scorer().token_probability(token, category)
    }

    pub fn save(&self) -> Result<String> {
        encode(&self.model)
    }

    /// Replaces the whole model with the decoded state.
    /// On error the current model is left as it was.
    pub fn load(&mut self, encoded: &str) -> Result<()> {
        self.model = decode(encoded)?;
        Ok(())
    }

    /// Tokens most recently learned for each category.
    pub fn get_suggestions(&self) -> BTreeMap<String, Vec<Token>> {
        self.model
            .categories()
            .map(|(label, stats)| (label.to_string(), stats.last_suggestion.clone()))
            .collect()
    }

    pub fn save_state(&self) -> Result<()> {
        if let Some(path) = &self.state_path {
            save_to_disk(&self.model, path)
        } else {
            Ok(()) // Don't error if no path is set
        }
    }

    /// Removes the first occurrence of each comma separated key from `results`.
    pub fn exclude_keys(keys: &str, results: &[String]) -> Vec<String> {
        let mut remaining = results.to_vec();
        for key in keys.split(',') {
            if let Some(index) = remaining.iter().position(|item| item == key) {
                remaining.remove(index);
            }
        }
        remaining
    }

    fn scorer(&self) -> Scorer<'_> {
        Scorer::new(&self.model, self.tokenizer.as_ref())
    }
}
