// ============================================================
// Layer 2 — ScoreUseCase
// ============================================================
// Scores messages against the remote deployment created by
// `publish`. The messages go through exactly the same clean →
// tokenise → pad path as training, so the rows the endpoint
// receives have the padded width the model was trained on.
//
//   Step 1: Load the saved config, tokenizer and deployment
//   Step 2: Vectorise the messages to padded rows
//   Step 3: POST the rows to the scoring endpoint
//   Step 4: Decode class indices back to label strings

use anyhow::{Context, Result};
use std::fs;

use crate::cloud::client::PlatformClient;
use crate::cloud::types::{Credentials, DeploymentRecord};
use crate::data::preprocessor::Preprocessor;
use crate::data::vectorizer::Vectorizer;
use crate::domain::message::LabelCodec;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};

pub struct ScoreConfig {
    pub artifacts_dir: String,
    pub credentials:   Credentials,
}

/// One scored message: the input text and the label the
/// deployment predicted for it.
#[derive(Debug)]
pub struct ScoredMessage {
    pub text:  String,
    pub label: String,
}

pub struct ScoreUseCase {
    config: ScoreConfig,
}

impl ScoreUseCase {
    pub fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    /// Score the given messages against the saved deployment.
    pub fn execute(&self, messages: &[String]) -> Result<Vec<ScoredMessage>> {
        let cfg = &self.config;

        // ── Step 1: Load saved artifacts ──────────────────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.artifacts_dir);
        let train_cfg    = ckpt_manager.load_config()?;
        let tokenizer    = TokenizerStore::new(&cfg.artifacts_dir).load()?;

        let record_path = ckpt_manager.dir().join("deployment.json");
        let record: DeploymentRecord = serde_json::from_str(
            &fs::read_to_string(&record_path).with_context(|| {
                format!(
                    "Cannot read '{}'. Have you run 'publish' first?",
                    record_path.display()
                )
            })?,
        )?;

        // ── Step 2: Vectorise to the training pad width ───────────────────────
        let preprocessor = Preprocessor::new();
        let vectorizer   = Vectorizer::new(tokenizer);

        let mut rows = Vec::with_capacity(messages.len());
        for message in messages {
            let seq = vectorizer.sequence(&preprocessor.clean(message))?;
            rows.push(Vectorizer::pad(&seq, train_cfg.pad_width));
        }

        // ── Step 3: Call the scoring endpoint ─────────────────────────────────
        tracing::info!(
            "Scoring {} messages against '{}'",
            rows.len(),
            record.scoring_url
        );
        let client  = PlatformClient::new(cfg.credentials.clone())?;
        let classes = client.score(&record.scoring_url, &rows)?;

        // ── Step 4: Decode predictions ────────────────────────────────────────
        let codec = LabelCodec::new(&train_cfg.sentinel_label, &train_cfg.other_label);
        Ok(messages
            .iter()
            .zip(classes)
            .map(|(text, class)| ScoredMessage {
                text:  text.clone(),
                label: codec.label_of(class).to_string(),
            })
            .collect())
    }
}
