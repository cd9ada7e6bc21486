pub mod engine;
pub mod scorer;
pub mod store;
pub mod tokenizer;
pub mod types;
