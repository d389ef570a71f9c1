// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod handle;

pub use crate::core::classifier::{rank, ClassifierModel, Guess};
pub use crate::core::engine::PredictorEngine;
pub use crate::core::loader::{load_counts, load_counts_from_path};
pub use crate::core::tokenizer::{Tokenizer, WordTokenizer};
pub use crate::core::types::RawCounts;
pub use crate::error::{PredictorError, Result};

use std::collections::BTreeMap;

/// Builds the immutable model from loaded counts.
pub fn build_model(raw: &RawCounts) -> Result<ClassifierModel> {
    ClassifierModel::build(raw)
}

/// Classifies `text` with the default word tokenizer.
pub fn classify(model: &ClassifierModel, text: &str) -> Result<BTreeMap<String, f64>> {
    model.classify(&WordTokenizer::new(), text)
}
