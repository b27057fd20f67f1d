// ============================================================
// Layer 2 — PublishUseCase
// ============================================================
// Takes the locally archived model through the two remote
// stages: registration with the platform's model repository,
// then provisioning of an online scoring deployment.
//
//   Step 1: Locate (or rebuild) the artifact archive
//   Step 2: Register the archive → model id
//   Step 3: Create an online deployment → scoring URL
//   Step 4: Persist deployment.json so `score` can find
//           the endpoint later
//
// Everything behind steps 2 and 3 is owned by the platform;
// any rejection aborts the run with the platform's error.

use anyhow::Result;
use std::fs;

use crate::application::train_use_case::ARCHIVE_NAME;
use crate::cloud::client::PlatformClient;
use crate::cloud::types::{Credentials, DeploymentRecord, ModelMetadata};
use crate::infra::{archive::Archiver, checkpoint::CheckpointManager};

pub struct PublishConfig {
    pub artifacts_dir:   String,
    pub model_name:      String,
    pub deployment_name: String,
    pub credentials:     Credentials,
}

pub struct PublishUseCase {
    config: PublishConfig,
}

impl PublishUseCase {
    pub fn new(config: PublishConfig) -> Self {
        Self { config }
    }

    /// Register the archive and deploy it. Returns the
    /// deployment record that was also written to disk.
    pub fn execute(&self) -> Result<DeploymentRecord> {
        let cfg = &self.config;
        let ckpt_manager = CheckpointManager::new(&cfg.artifacts_dir);

        // ── Step 1: Locate or rebuild the archive ─────────────────────────────
        // `train` leaves one behind; rebuild from the checkpoint
        // files if it was deleted since
        let archive_path = ckpt_manager.dir().join(ARCHIVE_NAME);
        if !archive_path.exists() {
            tracing::info!("Archive missing — rebuilding from checkpoint files");
            Archiver::pack(&ckpt_manager.archive_members()?, &archive_path)?;
        }

        // ── Step 2: Register the model ────────────────────────────────────────
        let client   = PlatformClient::new(cfg.credentials.clone())?;
        let meta     = ModelMetadata::for_this_crate(&cfg.model_name);
        let model_id = client.register_model(&archive_path, &meta)?;

        // ── Step 3: Create the online deployment ──────────────────────────────
        let deployed = client.create_deployment(&model_id, &cfg.deployment_name)?;

        // ── Step 4: Persist the deployment record ─────────────────────────────
        let record = DeploymentRecord {
            model_id,
            deployment_id: deployed.id,
            scoring_url:   deployed.scoring_url,
        };

        let record_path = ckpt_manager.dir().join("deployment.json");
        fs::write(&record_path, serde_json::to_string_pretty(&record)?)?;
        tracing::info!("Deployment record saved to '{}'", record_path.display());

        Ok(record)
    }
}
