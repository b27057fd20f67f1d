// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Acquire the CSV dataset     (Layer 4 - data)
//   Step 2: Clean the message texts     (Layer 4 - data)
//   Step 3: Split train/test 90/10      (Layer 4 - data)
//   Step 4: Build tokenizer on train    (Layer 6 - infra)
//   Step 5: Vectorise and pad           (Layer 4 - data)
//   Step 6: Binarise labels             (Layer 3 - domain)
//   Step 7: Build Burn datasets         (Layer 4 - data)
//   Step 8: Save config                 (Layer 6 - infra)
//   Step 9: Run training loop           (Layer 5 - ml)
//   Step 10: Archive the artifacts      (Layer 6 - infra)
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{
    loader::CsvLoader,
    preprocessor::Preprocessor,
    splitter::split_train_test,
    vectorizer::Vectorizer,
    dataset::MessageDataset,
};
use crate::domain::message::{LabelCodec, MessageRecord, MessageSample};
use crate::domain::traits::DatasetSource;
use crate::infra::{
    archive::Archiver,
    checkpoint::CheckpointManager,
    metrics::MetricsLogger,
    tokenizer_store::TokenizerStore,
};
use crate::ml::trainer::run_training;

/// File name of the published archive inside the artifacts dir
pub const ARCHIVE_NAME: &str = "model.tar.gz";

// ─── Training Configuration ──────────────────────────────────────────────────
// All settings for a training run. Serialisable so it can be
// saved to disk and reloaded for inference and scoring. The
// fitted fields (pad_width, the actual vocab_size, other_label)
// are filled in during execute() before the config is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:      String,
    pub data_url:       Option<String>,
    pub artifacts_dir:  String,
    pub train_fraction: f64,
    pub sentinel_label: String,
    pub other_label:    String,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub lr:             f64,
    pub embed_dim:      usize,
    pub hidden_dim:     usize,
    pub dropout:        f64,
    pub vocab_size:     usize,
    pub pad_width:      usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:      "data/messages.csv".to_string(),
            data_url:       None,
            artifacts_dir:  "artifacts".to_string(),
            train_fraction: 0.9,
            sentinel_label: "spam".to_string(),
            other_label:    "other".to_string(),
            epochs:         10,
            batch_size:     32,
            lr:             1e-3,
            embed_dim:      32,
            hidden_dim:     24,
            dropout:        0.1,
            vocab_size:     10000,
            pad_width:      0,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let mut cfg = self.config.clone();

        // ── Step 1: Acquire the dataset ───────────────────────────────────────
        // Downloads the CSV first when only a URL is configured
        tracing::info!("Loading dataset from '{}'", cfg.data_path);
        let loader  = CsvLoader::new(&cfg.data_path, cfg.data_url.clone());
        let records = loader.load_all()?;
        tracing::info!("Loaded {} labelled messages", records.len());

        // ── Step 2: Clean message texts ───────────────────────────────────────
        let preprocessor = Preprocessor::new();
        let records: Vec<MessageRecord> = records
            .into_iter()
            .map(|r| MessageRecord::new(r.label, preprocessor.clean(&r.text)))
            .collect();

        // The display name for the non-sentinel class is whatever
        // non-sentinel label the dataset actually uses
        cfg.other_label = records
            .iter()
            .map(|r| r.label.as_str())
            .find(|l| *l != cfg.sentinel_label)
            .unwrap_or("other")
            .to_string();

        // ── Step 3: Train/test split ──────────────────────────────────────────
        // Shuffle and split so the model is evaluated on unseen data
        let (train_records, test_records) = split_train_test(records, cfg.train_fraction);
        tracing::info!(
            "Split: {} train, {} test",
            train_records.len(),
            test_records.len()
        );

        // ── Step 4: Build / load tokenizer ────────────────────────────────────
        // Fitted on the TRAINING partition only, so test vocabulary
        // never leaks into the model
        let train_texts: Vec<String> = train_records.iter().map(|r| r.text.clone()).collect();
        let tok_store = TokenizerStore::new(&cfg.artifacts_dir);
        let tokenizer = tok_store.load_or_build(&train_texts, cfg.vocab_size)?;

        // The embedding table must cover exactly the fitted vocabulary
        cfg.vocab_size = tokenizer.get_vocab_size(true);

        // ── Step 5: Vectorise and pad ─────────────────────────────────────────
        // The padded width is the longest training sequence; test
        // rows are padded (or truncated) to that same width
        let vectorizer = Vectorizer::new(tokenizer);

        let train_seqs = vectorizer.sequences(&train_texts)?;
        cfg.pad_width  = Vectorizer::fit_width(&train_seqs);
        tracing::info!("Padded width fitted on training partition: {}", cfg.pad_width);

        let test_texts: Vec<String> = test_records.iter().map(|r| r.text.clone()).collect();
        let test_seqs = vectorizer.sequences(&test_texts)?;

        // ── Step 6: Binarise labels and build samples ─────────────────────────
        let codec = LabelCodec::new(&cfg.sentinel_label, &cfg.other_label);
        let train_samples = build_samples(&train_records, &train_seqs, cfg.pad_width, &codec);
        let test_samples  = build_samples(&test_records, &test_seqs, cfg.pad_width, &codec);

        // ── Step 7: Build Burn datasets ───────────────────────────────────────
        let train_dataset = MessageDataset::new(train_samples);
        let test_dataset  = MessageDataset::new(test_samples);

        // ── Step 8: Save config for inference and scoring ─────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.artifacts_dir);
        ckpt_manager.save_config(&cfg)?;

        // ── Step 9: Run training loop (Layer 5) ───────────────────────────────
        let metrics = MetricsLogger::new(&cfg.artifacts_dir)?;
        run_training(&cfg, train_dataset, test_dataset, ckpt_manager, metrics)?;

        // ── Step 10: Archive the artifacts ────────────────────────────────────
        // Re-running overwrites the previous archive in place
        let ckpt_manager = CheckpointManager::new(&cfg.artifacts_dir);
        let archive_path = ckpt_manager.dir().join(ARCHIVE_NAME);
        Archiver::pack(&ckpt_manager.archive_members()?, &archive_path)?;
        tracing::info!("Artifacts archived to '{}'", archive_path.display());

        Ok(())
    }
}

/// Pair each padded row with its class index.
/// One sample per record — the padded matrix and the label
/// vector always have the same row count.
fn build_samples(
    records:   &[MessageRecord],
    sequences: &[Vec<u32>],
    width:     usize,
    codec:     &LabelCodec,
) -> Vec<MessageSample> {
    records
        .iter()
        .zip(sequences.iter())
        .map(|(record, seq)| MessageSample {
            input_ids: Vectorizer::pad(seq, width),
            class:     codec.class_of(&record.label),
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_samples_pairs_rows_with_classes() {
        let codec = LabelCodec::new("spam", "ham");
        let records = vec![
            MessageRecord::new("spam", "free entry"),
            MessageRecord::new("ham", "see you"),
        ];
        let seqs = vec![vec![2, 3], vec![4, 5, 6]];

        let samples = build_samples(&records, &seqs, 4, &codec);

        assert_eq!(samples.len(), records.len());
        assert_eq!(samples[0].input_ids, vec![2, 3, 0, 0]);
        assert_eq!(samples[0].class, 0);
        assert_eq!(samples[1].input_ids, vec![4, 5, 6, 0]);
        assert_eq!(samples[1].class, 1);
    }
}
