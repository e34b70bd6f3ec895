// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop using Burn's DataLoader and Adam
// with weight decay and linear learning-rate warmup.
//
// Key Burn insight:
//   - Training uses TrainBackend (Autodiff<Wgpu>) for gradients
//   - model.valid() returns the model on InnerBackend (Wgpu)
//   - The validation batcher must also use InnerBackend
//
// Per epoch the loop records average train loss, validation
// loss, and validation perplexity to the metrics CSV, saves a
// checkpoint, and keeps a pointer to the best-validation-loss
// epoch so inference loads the best model rather than the last.
//
// Reference: Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{decay::WeightDecayConfig, AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::LmBatcher, dataset::LmDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{CausalLmConfig, CausalLmModel};

type TrainBackend = burn::backend::Autodiff<burn::backend::Wgpu>;
type InnerBackend = burn::backend::Wgpu;

pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: LmDataset,
    val_dataset:   LmDataset,
    ckpt_manager:  &CheckpointManager,
) -> Result<()> {
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    train_loop(cfg, train_dataset, val_dataset, ckpt_manager, device)
}

fn train_loop(
    cfg:           &TrainConfig,
    train_dataset: LmDataset,
    val_dataset:   LmDataset,
    ckpt_manager:  &CheckpointManager,
    device:        burn::backend::wgpu::WgpuDevice,
) -> Result<()> {

    // ── Build model (resume from checkpoint when one exists) ──────────────────
    let model_cfg = CausalLmConfig::new(
        cfg.vocab_size, cfg.max_seq_len, cfg.d_model,
        cfg.num_heads, cfg.num_layers, cfg.d_ff, cfg.dropout,
    );
    let mut model: CausalLmModel<TrainBackend> = model_cfg.init(&device);
    if ckpt_manager.has_checkpoint() {
        model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Resumed weights from latest checkpoint");
    }
    tracing::info!("Model ready: {} layers, d_model={}", cfg.num_layers, cfg.d_model);

    // ── Adam with weight decay ────────────────────────────────────────────────
    let mut optim = optimizer_config(cfg).init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = LmBatcher::<TrainBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (InnerBackend — no autodiff overhead) ──────────
    let val_batcher = LmBatcher::<InnerBackend>::new(device.clone());
    let val_loader  = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;

    let mut global_step   = 0usize;
    let mut best_val_loss = f64::INFINITY;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            global_step += 1;

            let (loss, _) = model.forward_loss(batch.input_ids);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            // Linear warmup: ramp the lr over the first warmup_steps
            let lr = warmup_lr(cfg.lr, global_step, cfg.warmup_steps);

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(lr, model, grads);

            if global_step % cfg.logging_steps == 0 {
                tracing::info!(
                    "step {:>6} | lr={:.2e} | loss={:.4}",
                    global_step, lr, loss_val
                );
            }
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        // model.valid() → CausalLmModel<InnerBackend>
        // dropout disabled for deterministic evaluation
        let model_valid = model.valid();

        let mut val_loss_sum = 0.0f64;
        let mut val_batches  = 0usize;

        for batch in val_loader.iter() {
            let (loss, _) = model_valid.forward_loss(batch.input_ids);
            val_loss_sum += loss.into_scalar().elem::<f64>();
            val_batches  += 1;
        }

        let avg_val_loss = if val_batches > 0 {
            val_loss_sum / val_batches as f64
        } else { f64::NAN };
        let perplexity = avg_val_loss.exp();

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | ppl={:.2}",
            epoch, cfg.epochs, avg_train_loss, avg_val_loss, perplexity,
        );

        metrics.log(&EpochMetrics::new(epoch, avg_train_loss, avg_val_loss, perplexity))?;
        ckpt_manager.save_model(&model, epoch)?;

        if avg_val_loss < best_val_loss {
            best_val_loss = avg_val_loss;
            ckpt_manager.mark_best(epoch)?;
            tracing::info!("New best validation loss {:.4} at epoch {}", best_val_loss, epoch);
        }
    }

    tracing::info!("Training complete");
    Ok(())
}

/// Adam with the run's weight-decay penalty. The penalty is
/// passed through as f64, which is what WeightDecayConfig
/// takes.
fn optimizer_config(cfg: &TrainConfig) -> AdamConfig {
    AdamConfig::new()
        .with_epsilon(1e-8)
        .with_weight_decay(Some(WeightDecayConfig::new(cfg.weight_decay)))
}

/// Linear learning-rate warmup over the first `warmup_steps`
/// optimisation steps; the configured rate afterwards.
fn warmup_lr(base_lr: f64, step: usize, warmup_steps: usize) -> f64 {
    if warmup_steps == 0 {
        return base_lr;
    }
    base_lr * ((step as f64) / (warmup_steps as f64)).min(1.0)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warmup_ramps_linearly_then_holds() {
        assert!((warmup_lr(1.0, 1, 100) - 0.01).abs() < 1e-12);
        assert!((warmup_lr(1.0, 50, 100) - 0.5).abs() < 1e-12);
        assert_eq!(warmup_lr(1.0, 100, 100), 1.0);
        assert_eq!(warmup_lr(1.0, 5000, 100), 1.0);
    }

    #[test]
    fn test_zero_warmup_uses_base_lr() {
        assert_eq!(warmup_lr(5e-5, 1, 0), 5e-5);
    }

    #[test]
    fn test_optimizer_config_carries_weight_decay() {
        let cfg = TrainConfig::default();
        let optim_cfg = optimizer_config(&cfg);
        assert!(optim_cfg.weight_decay.is_some());
    }
}
