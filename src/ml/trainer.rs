// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + evaluation loop using Burn's DataLoader and Adam.
//
// Backend notes:
//   - Training uses TrainBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on EvalBackend (NdArray)
//   - The evaluation batcher must also use EvalBackend
//   - argmax(1) returns [batch, 1] so we flatten before .equal()
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::MessageBatcher, dataset::MessageDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{SpamNet, SpamNetConfig};

type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
type EvalBackend  = burn::backend::NdArray;

pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: MessageDataset,
    test_dataset:  MessageDataset,
    ckpt_manager:  CheckpointManager,
    metrics:       MetricsLogger,
) -> Result<()> {
    let device = burn::backend::ndarray::NdArrayDevice::Cpu;
    train_loop(cfg, train_dataset, test_dataset, ckpt_manager, metrics, device)
}

fn train_loop(
    cfg:           &TrainConfig,
    train_dataset: MessageDataset,
    test_dataset:  MessageDataset,
    ckpt_manager:  CheckpointManager,
    metrics:       MetricsLogger,
    device:        burn::backend::ndarray::NdArrayDevice,
) -> Result<()> {

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = SpamNetConfig::new(
        cfg.vocab_size, cfg.embed_dim, cfg.hidden_dim, cfg.dropout,
    );
    let mut model: SpamNet<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: vocab={}, embed_dim={}, hidden_dim={}",
        cfg.vocab_size, cfg.embed_dim, cfg.hidden_dim,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = MessageBatcher::<TrainBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(42)
        .num_workers(1)
        .build(train_dataset);

    // ── Evaluation data loader (inner backend — no autodiff overhead) ─────────
    let eval_batcher = MessageBatcher::<EvalBackend>::new(device.clone());
    let eval_loader  = DataLoaderBuilder::new(eval_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(test_dataset);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    let mut best_test_loss = f64::INFINITY;
    let mut best_epoch     = 0usize;

    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(batch.inputs, batch.targets);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Evaluation phase ──────────────────────────────────────────────────
        // model.valid() → SpamNet<EvalBackend>
        // dropout disabled for deterministic evaluation
        let model_eval = model.valid();

        let mut test_loss_sum = 0.0f64;
        let mut test_batches  = 0usize;
        let mut correct       = 0usize;
        let mut total_samples = 0usize;

        for batch in eval_loader.iter() {
            let (loss, logits) = model_eval.forward_loss(
                batch.inputs,
                batch.targets.clone(),
            );

            test_loss_sum += loss.into_scalar().elem::<f64>();
            test_batches  += 1;

            // argmax(1) returns shape [batch, 1] — flatten to [batch]
            // before comparing with targets which is [batch]
            let predicted = logits.argmax(1).flatten::<1>(0, 1);

            total_samples += batch.targets.dims()[0];

            let batch_correct: i64 = predicted
                .equal(batch.targets)
                .int().sum().into_scalar().elem::<i64>();
            correct += batch_correct as usize;
        }

        let avg_test_loss = if test_batches  > 0 { test_loss_sum / test_batches as f64 } else { f64::NAN };
        let test_acc      = if total_samples > 0 { correct as f64 / total_samples as f64 } else { 0.0 };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | test_loss={:.4} | test_acc={:.1}%",
            epoch, cfg.epochs, avg_train_loss, avg_test_loss, test_acc * 100.0,
        );

        let row = EpochMetrics::new(epoch, avg_train_loss, avg_test_loss, test_acc);
        if row.is_improvement(best_test_loss) {
            best_test_loss = row.test_loss;
            best_epoch     = epoch;
            tracing::info!("New best test loss at epoch {}: {:.4}", epoch, best_test_loss);
        }
        metrics.log(&row)?;

        ckpt_manager.save_model(&model, epoch)?;
        tracing::info!("Checkpoint saved for epoch {}", epoch);
    }

    tracing::info!(
        "Training complete! Best test loss {:.4} at epoch {}",
        best_test_loss, best_epoch,
    );
    Ok(())
}
