// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder.
//
// What gets saved per checkpoint:
//   1. Model weights (.mpk file) — all learned parameters
//   2. latest_epoch.json         — which epoch was last saved
//   3. train_config.json         — architecture + pipeline config
//
// Why save the config separately?
//   When loading for inference or scoring, we need the exact
//   model architecture (embed_dim, hidden_dim, vocab_size) to
//   rebuild the model before loading the weights into it, and
//   the padded row width to vectorise new messages. Without the
//   config, neither is possible.
//
// File naming convention:
//   artifacts/
//     model_epoch_1.mpk      ← weights after epoch 1
//     model_epoch_2.mpk      ← weights after epoch 2
//     ...
//     latest_epoch.json      ← contains the number of latest epoch
//     train_config.json      ← hyperparameters + fitted pad width
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::SpamNet;

/// Manages saving and loading of model checkpoints.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// The directory this manager writes into
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Save model weights for a given epoch and move the
    /// latest-epoch pointer forward.
    pub fn save_model<B: AutodiffBackend>(
        &self,
        model: &SpamNet<B>,
        epoch: usize,
    ) -> Result<()> {
        // Build the file path (without extension — recorder adds it)
        let path = self.dir.join(format!("model_epoch_{epoch}"));

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save checkpoint to '{}'", path.display())
            })?;

        let latest_path = self.dir.join("latest_epoch.json");
        fs::write(&latest_path, serde_json::to_string(&epoch)?)
            .with_context(|| "Failed to write latest_epoch.json")?;

        tracing::debug!("Saved checkpoint: epoch {}", epoch);
        Ok(())
    }

    /// Load model weights from the latest saved checkpoint.
    ///
    /// The model parameter must have the correct architecture
    /// (matching the saved checkpoint) or loading will fail.
    pub fn load_model<B: Backend>(
        &self,
        model:  SpamNet<B>,
        device: &B::Device,
    ) -> Result<SpamNet<B>> {
        let epoch = self.latest_epoch()?;
        let path  = self.dir.join(format!("model_epoch_{epoch}"));

        tracing::info!("Loading checkpoint from epoch {}", epoch);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display()
                )
            })?;

        Ok(model.load_record(record))
    }

    /// Save the training configuration to JSON.
    ///
    /// Must be called before training starts so the predictor
    /// and the scoring path can reconstruct the model and the
    /// padded row width.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load the training configuration from JSON.
    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join("train_config.json");

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Make sure you have run 'train' first.",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str(&json)?)
    }

    /// Read latest_epoch.json and return the epoch number.
    /// Returns an error if training hasn't been run yet.
    fn latest_epoch(&self) -> Result<usize> {
        let path = self.dir.join("latest_epoch.json");

        let s = fs::read_to_string(&path)
            .with_context(|| {
                "Cannot find 'latest_epoch.json'. \
                 Have you run 'train' first?"
            })?;

        Ok(serde_json::from_str::<usize>(&s)?)
    }

    /// File names that belong in the published archive: the
    /// latest weights, the config, and the tokenizer.
    /// CompactRecorder appends `.mpk` to the path it is given.
    pub fn archive_members(&self) -> Result<Vec<PathBuf>> {
        let epoch = self.latest_epoch()?;
        Ok(vec![
            self.dir.join(format!("model_epoch_{epoch}.mpk")),
            self.dir.join("train_config.json"),
            self.dir.join("tokenizer.json"),
        ])
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_round_trip() {
        let dir  = TempDir::new().unwrap();
        let mgr  = CheckpointManager::new(dir.path().to_str().unwrap());

        let mut cfg = TrainConfig::default();
        cfg.pad_width   = 17;
        cfg.vocab_size  = 321;
        cfg.other_label = "ham".to_string();

        mgr.save_config(&cfg).unwrap();
        let loaded = mgr.load_config().unwrap();

        assert_eq!(loaded.pad_width, 17);
        assert_eq!(loaded.vocab_size, 321);
        assert_eq!(loaded.other_label, "ham");
    }

    #[test]
    fn test_load_config_before_train_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mgr = CheckpointManager::new(dir.path().to_str().unwrap());
        assert!(mgr.load_config().is_err());
    }

    #[test]
    fn test_saved_checkpoint_files_exist_and_pack() {
        use crate::infra::archive::Archiver;
        use crate::ml::model::SpamNetConfig;

        type B = burn::backend::Autodiff<burn::backend::NdArray>;

        let dir = TempDir::new().unwrap();
        let mgr = CheckpointManager::new(dir.path().to_str().unwrap());

        // Save a real (tiny) model, not a hand-made file, so the
        // member names below match what the recorder writes
        let device = burn::backend::ndarray::NdArrayDevice::Cpu;
        let model: SpamNet<B> = SpamNetConfig::new(20, 4, 3, 0.0).init(&device);
        mgr.save_model(&model, 1).unwrap();
        mgr.save_config(&TrainConfig::default()).unwrap();
        fs::write(dir.path().join("tokenizer.json"), "{}").unwrap();

        let members = mgr.archive_members().unwrap();
        for m in &members {
            assert!(m.exists(), "missing archive member: {}", m.display());
        }

        let out = dir.path().join("model.tar.gz");
        Archiver::pack(&members, &out).unwrap();

        let names = Archiver::list(&out).unwrap();
        assert!(names.iter().any(|n| n == "model_epoch_1.mpk"));
        assert!(names.iter().any(|n| n == "train_config.json"));
        assert!(names.iter().any(|n| n == "tokenizer.json"));
    }
}
