pub mod classifier;
pub mod distribution;
pub mod engine;
pub mod loader;
pub mod tokenizer;
pub mod types;
