// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder
// (MessagePack + gzip; loading fails if the architecture does
// not match what was saved).
//
// File layout per subject:
//   models/<subject>/
//     model_epoch_1.mpk.gz   ← weights after epoch 1
//     model_epoch_2.mpk.gz   ← ...
//     latest_epoch.json      ← number of the last saved epoch
//     best_epoch.json        ← epoch with the best val loss
//     train_config.json      ← run + architecture config
//
// The config is saved separately because inference has to
// rebuild the exact architecture (d_model, num_layers, ...)
// before the weights can be loaded into it.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::CausalLmModel;

/// Manages saving and loading of model checkpoints.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager, creating the directory
    /// if it doesn't already exist.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// True once at least one epoch has been saved.
    pub fn has_checkpoint(&self) -> bool {
        self.dir.join("latest_epoch.json").exists()
    }

    /// Save model weights for a given epoch and update the
    /// latest-epoch pointer.
    pub fn save_model<B: AutodiffBackend>(
        &self,
        model: &CausalLmModel<B>,
        epoch: usize,
    ) -> Result<()> {
        // Recorder appends its own extension
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

    /// Record that `epoch` currently has the best validation
    /// loss. Inference prefers this epoch over the latest one.
    pub fn mark_best(&self, epoch: usize) -> Result<()> {
        let path = self.dir.join("best_epoch.json");
        fs::write(&path, serde_json::to_string(&epoch)?)
            .with_context(|| "Failed to write best_epoch.json")?;
        Ok(())
    }

    /// Load weights from the best epoch when one is recorded,
    /// otherwise from the latest. The model argument must have
    /// the matching architecture.
    pub fn load_model<B: Backend>(
        &self,
        model:  CausalLmModel<B>,
        device: &B::Device,
    ) -> Result<CausalLmModel<B>> {
        let epoch = self.checkpoint_epoch()?;
        let path  = self.dir.join(format!("model_epoch_{epoch}"));

        tracing::info!("Loading checkpoint from epoch {}", epoch);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display())
            })?;

        Ok(model.load_record(record))
    }

    /// Save the run configuration to JSON so inference can
    /// reconstruct the exact model architecture.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| {
                format!("Cannot write config to '{}'", path.display())
            })?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load the run configuration saved alongside the weights.
    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join("train_config.json");

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Make sure you have run 'train' before 'generate'.",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str(&json)?)
    }

    /// The epoch inference should load: best when recorded,
    /// latest otherwise.
    fn checkpoint_epoch(&self) -> Result<usize> {
        let best = self.dir.join("best_epoch.json");
        let path = if best.exists() {
            best
        } else {
            self.dir.join("latest_epoch.json")
        };

        let s = fs::read_to_string(&path)
            .with_context(|| {
                "Cannot find a checkpoint pointer. Have you run 'train' first?"
            })?;

        Ok(serde_json::from_str::<usize>(&s)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let mgr  = CheckpointManager::new(dir.path().to_str().unwrap());
        let cfg  = TrainConfig::default();

        mgr.save_config(&cfg).unwrap();
        let loaded = mgr.load_config().unwrap();
        assert_eq!(loaded.max_seq_len, cfg.max_seq_len);
        assert_eq!(loaded.vocab_size, cfg.vocab_size);
    }

    #[test]
    fn test_best_pointer_wins_over_latest() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = CheckpointManager::new(dir.path().to_str().unwrap());

        fs::write(dir.path().join("latest_epoch.json"), "9").unwrap();
        assert_eq!(mgr.checkpoint_epoch().unwrap(), 9);

        mgr.mark_best(4).unwrap();
        assert_eq!(mgr.checkpoint_epoch().unwrap(), 4);
    }

    #[test]
    fn test_no_checkpoint_yet() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = CheckpointManager::new(dir.path().to_str().unwrap());
        assert!(!mgr.has_checkpoint());
        assert!(mgr.checkpoint_epoch().is_err());
    }
}
