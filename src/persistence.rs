// File: src/persistence.rs
use crate::core::store::Model;
use crate::core::types::CategoryStats;
use crate::error::{ClassifierError, MalformedStateError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Older states stored label sets as `{label: true}` objects.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LabelSet {
    List(Vec<String>),
    Flags(BTreeMap<String, bool>),
}

impl LabelSet {
    fn into_labels(self) -> Vec<String> {
        match self {
            LabelSet::List(labels) => labels,
            LabelSet::Flags(flags) => flags.into_keys().collect(),
        }
    }
}

/// The persisted document. Field names are part of the format.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerializableState {
    categories: LabelSet,
    #[serde(alias = "docCount")]
    document_count: BTreeMap<String, u64>,
    total_documents: u64,
    vocabulary: LabelSet,
    vocabulary_size: u64,
    word_count: BTreeMap<String, u64>,
    #[serde(alias = "wordFrequencyCount")]
    word_frequency: BTreeMap<String, BTreeMap<String, u64>>,
    #[serde(default, alias = "machineSuggestions")]
    last_suggestion: Option<BTreeMap<String, Vec<String>>>,
}

impl SerializableState {
    fn capture(model: &Model) -> Self {
        let mut state = SerializableState {
            categories: LabelSet::List(model.categories.keys().cloned().collect()),
            document_count: BTreeMap::new(),
            total_documents: model.total_documents,
            vocabulary: LabelSet::List(model.vocabulary().into_iter().map(str::to_string).collect()),
            vocabulary_size: model.vocabulary_size,
            word_count: BTreeMap::new(),
            word_frequency: BTreeMap::new(),
            last_suggestion: None,
        };

        let mut suggestions = BTreeMap::new();
        for (label, stats) in &model.categories {
            state.document_count.insert(label.clone(), stats.document_count);
            state.word_count.insert(label.clone(), stats.word_count);
            state.word_frequency.insert(
                label.clone(),
                stats
                    .word_frequency
                    .iter()
                    .map(|(token, count)| (token.clone(), *count))
                    .collect(),
            );
            suggestions.insert(label.clone(), stats.last_suggestion.clone());
        }
        state.last_suggestion = Some(suggestions);
        state
    }

    fn restore(mut self) -> std::result::Result<Model, MalformedStateError> {
        let mut model = Model::new();
        let labels: HashSet<String> = self.categories.into_labels().into_iter().collect();

        for (field, keys) in [
            ("documentCount", self.document_count.keys().collect::<Vec<_>>()),
            ("wordCount", self.word_count.keys().collect()),
            ("wordFrequency", self.word_frequency.keys().collect()),
        ] {
            if let Some(unknown) = keys.into_iter().find(|key| !labels.contains(*key)) {
                return Err(MalformedStateError::Inconsistent(format!(
                    "{field} names unknown category {unknown:?}"
                )));
            }
        }

        let mut suggestions = self.last_suggestion.unwrap_or_default();
        for label in labels {
            let missing = |field: &str| {
                MalformedStateError::Inconsistent(format!("{field} has no entry for {label:?}"))
            };
            let document_count = self
                .document_count
                .remove(&label)
                .ok_or_else(|| missing("documentCount"))?;
            let word_count = self.word_count.remove(&label).ok_or_else(|| missing("wordCount"))?;
            let word_frequency = self
                .word_frequency
                .remove(&label)
                .ok_or_else(|| missing("wordFrequency"))?;

            let stats = CategoryStats {
                document_count,
                word_count,
                word_frequency: word_frequency.into_iter().collect(),
                last_suggestion: suggestions.remove(&label).unwrap_or_default(),
            };
            model.categories.insert(label, stats);
        }
        if !suggestions.is_empty() {
            tracing::debug!(
                ignored = suggestions.len(),
                "dropping suggestions for unknown categories"
            );
        }

        model.vocabulary = self.vocabulary.into_labels().into_iter().collect();
        model.vocabulary_size = self.vocabulary_size;
        model.total_documents = self.total_documents;

        model
            .check_invariants()
            .map_err(MalformedStateError::Inconsistent)?;
        Ok(model)
    }
}

/// Serializes the model to JSON and wraps it in base64.
pub fn encode(model: &Model) -> Result<String> {
    let state = SerializableState::capture(model);
    let json = serde_json::to_vec(&state).map_err(ClassifierError::Encode)?;
    Ok(STANDARD.encode(json))
}

/// Inverse of [`encode`]. Builds a fresh model; nothing is merged.
pub fn decode(encoded: &str) -> Result<Model> {
    let json = STANDARD
        .decode(encoded.trim())
        .map_err(MalformedStateError::from)?;
    let state: SerializableState =
        serde_json::from_slice(&json).map_err(MalformedStateError::from)?;
    Ok(state.restore()?)
}

pub fn save_to_disk(model: &Model, path: &Path) -> Result<()> {
    let io_err = |source| ClassifierError::Io {
        path: path.to_path_buf(),
        source,
    };
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(io_err)?;

    let encoded = encode(model)?;

    let mut temp_file = NamedTempFile::new_in(parent_dir).map_err(io_err)?;
    temp_file.write_all(encoded.as_bytes()).map_err(io_err)?;
    temp_file.flush().map_err(io_err)?;
    temp_file.persist(path).map_err(|e| io_err(e.error))?;

    tracing::info!(path = %path.display(), bytes = encoded.len(), "saved model state");
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<Model> {
    let encoded = fs::read_to_string(path).map_err(|source| ClassifierError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let model = decode(&encoded)?;
    tracing::info!(
        path = %path.display(),
        categories = model.categories.len(),
        vocabulary_size = model.vocabulary_size,
        "loaded model state"
    );
    Ok(model)
}
