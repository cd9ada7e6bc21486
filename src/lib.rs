// src/lib.rs

pub mod core;
pub mod error;
pub mod learning;
pub mod logging;
pub mod persistence;

pub use crate::core::engine::{Classifier, ClassifierConfig};
pub use crate::core::tokenizer::{DefaultTokenizer, Tokenizer, TokenizerKind, WhitespaceTokenizer};
pub use crate::error::{ClassifierError, MalformedStateError, Result};
