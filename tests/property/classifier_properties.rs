use bayes_core::learning::category_key;
use bayes_core::{Classifier, ClassifierError};
use proptest::prelude::*;

fn documents() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z ,.!]{0,24}", "[a-c]"), 1..12)
}

fn trained(docs: &[(String, String)]) -> Classifier {
    let mut classifier = Classifier::new();
    for (text, category) in docs {
        classifier.learn(text, category);
    }
    classifier
}

proptest! {
    #[test]
    fn invariants_hold_after_learning(docs in documents()) {
        let classifier = trained(&docs);
        prop_assert!(classifier.model().check_invariants().is_ok());
        prop_assert_eq!(classifier.model().total_documents(), docs.len() as u64);
    }

    #[test]
    fn learning_twice_doubles_frequencies(text in "[a-z ,.]{0,40}") {
        let mut once = Classifier::new();
        once.learn(&text, "c");
        let mut twice = once.clone_via_state();
        twice.learn(&text, "c");

        let first = once.model().category("c").unwrap();
        let second = twice.model().category("c").unwrap();
        for (token, count) in &first.word_frequency {
            prop_assert_eq!(second.frequency_of(token), count * 2);
        }
        prop_assert_eq!(second.word_count, first.word_count * 2);
        prop_assert_eq!(twice.model().vocabulary_size(), once.model().vocabulary_size());
    }

    #[test]
    fn save_then_load_is_identity(docs in documents()) {
        let classifier = trained(&docs);
        let mut restored = Classifier::new();
        restored.load(&classifier.save().unwrap()).unwrap();
        prop_assert_eq!(restored.model(), classifier.model());
        prop_assert_eq!(restored.get_suggestions(), classifier.get_suggestions());
    }

    #[test]
    fn categorize_is_deterministic(docs in documents(), text in "[a-z ,.!]{0,24}") {
        let classifier = trained(&docs);
        let first = classifier.categorize(&text).unwrap();
        let restored = classifier.clone_via_state();
        prop_assert_eq!(classifier.categorize(&text).unwrap(), first.clone());
        prop_assert_eq!(restored.categorize(&text).unwrap(), first);
    }

    #[test]
    fn trained_model_never_reports_empty(docs in documents(), text in ".{0,24}") {
        let classifier = trained(&docs);
        let result = classifier.categorize(&text);
        prop_assert!(!matches!(result, Err(ClassifierError::EmptyModel)));
    }

    #[test]
    fn key_order_does_not_matter(mut keys in prop::collection::vec("[a-z]{1,6}", 1..6)) {
        let forward = category_key(&keys);
        keys.reverse();
        prop_assert_eq!(category_key(&keys), forward);
    }
}

trait CloneViaState {
    fn clone_via_state(&self) -> Classifier;
}

impl CloneViaState for Classifier {
    fn clone_via_state(&self) -> Classifier {
        let mut copy = Classifier::new();
        copy.load(&self.save().unwrap()).unwrap();
        copy
    }
}
