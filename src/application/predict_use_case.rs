// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Local inference: classify one message with the checkpointed
// model, no platform involved. Useful for sanity-checking a
// trained model before (or without) publishing it.

use anyhow::Result;

use crate::domain::traits::{MessageClassifier, Verdict};
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::predictor::Predictor;

pub struct PredictUseCase {
    classifier: Predictor,
}

impl PredictUseCase {
    /// Load the predictor from the saved artifacts.
    pub fn new(artifacts_dir: &str) -> Result<Self> {
        let ckpt_manager = CheckpointManager::new(artifacts_dir);
        let tokenizer    = TokenizerStore::new(artifacts_dir).load()?;
        let classifier   = Predictor::from_checkpoint(&ckpt_manager, tokenizer)?;
        Ok(Self { classifier })
    }

    /// Classify one message locally.
    pub fn execute(&self, message: &str) -> Result<Verdict> {
        self.classifier.classify(message)
    }
}
