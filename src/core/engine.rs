use crate::config::PredictorConfig;
use crate::core::classifier::{rank, ClassifierModel, Guess};
use crate::core::loader::load_counts_from_path;
use crate::core::tokenizer::{Tokenizer, WordTokenizer};
use crate::core::types::Category;
use crate::error::Result;
use crate::handle::ModelHandle;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

// The predictor engine ties the model handle to a tokenizer and the shortlist
// size. The model is built once and reused for every request.
pub struct PredictorEngine<T: Tokenizer = WordTokenizer> {
    handle: ModelHandle,
    tokenizer: T,
    config: PredictorConfig,
}

impl PredictorEngine<WordTokenizer> {
    /// Loads the configured counts file and builds the model.
    pub fn from_config(config: PredictorConfig) -> Result<Self> {
        let model = build_from_path(&config)?;
        Ok(Self::with_model(model, WordTokenizer::new(), config))
    }
}

impl<T: Tokenizer> PredictorEngine<T> {
    pub fn with_model(model: ClassifierModel, tokenizer: T, config: PredictorConfig) -> Self {
        Self {
            handle: ModelHandle::new(model),
            tokenizer,
            config,
        }
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn model(&self) -> Arc<ClassifierModel> {
        self.handle.snapshot()
    }

    /// Full posterior over every category.
    pub fn distribution(&self, text: &str) -> Result<BTreeMap<Category, f64>> {
        self.handle.snapshot().classify(&self.tokenizer, text)
    }

    /// The top `top_k` guesses, most likely first.
    pub fn predict(&self, text: &str) -> Result<Vec<Guess>> {
        let mut guesses = rank(&self.distribution(text)?);
        guesses.truncate(self.config.top_k);
        Ok(guesses)
    }

    /// Rebuilds the model from the counts file. On failure the current model
    /// stays in place.
    pub fn reload(&self) -> Result<()> {
        let model = build_from_path(&self.config)?;
        self.handle.swap(model);
        info!(path = %self.config.counts_path.display(), "model reloaded");
        Ok(())
    }
}

fn build_from_path(config: &PredictorConfig) -> Result<ClassifierModel> {
    let raw = load_counts_from_path(&config.counts_path)?;
    ClassifierModel::build(&raw)
}
