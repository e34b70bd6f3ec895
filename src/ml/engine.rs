// ============================================================
// Layer 5 — Burn Fine-Tune Engine
// ============================================================
// The shipped FineTuneEngine implementation. Owns the corpus
// tokenizer, the run config, and the checkpoint manager, and
// delegates the optimisation loop to trainer::run_training.
//
// tokenize() is where cleaned text becomes fixed-length
// samples: encode, truncate to max_seq_len, pad with PAD_ID,
// and record the attention mask. Everything after that point
// is tensors.

use anyhow::Result;
use tokenizers::Tokenizer;

use crate::application::train_use_case::TrainConfig;
use crate::data::dataset::LmDataset;
use crate::domain::sample::{LmSample, PAD_ID};
use crate::domain::traits::FineTuneEngine;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::trainer::run_training;

pub struct BurnLmEngine {
    cfg:       TrainConfig,
    tokenizer: Tokenizer,
    ckpt:      CheckpointManager,
}

impl BurnLmEngine {
    pub fn new(cfg: TrainConfig, tokenizer: Tokenizer, ckpt: CheckpointManager) -> Self {
        Self { cfg, tokenizer, ckpt }
    }
}

impl FineTuneEngine for BurnLmEngine {
    fn tokenize(&self, texts: &[String]) -> Result<Vec<LmSample>> {
        let max_len = self.cfg.max_seq_len;
        let mut samples = Vec::with_capacity(texts.len());

        for text in texts {
            let enc = self.tokenizer
                .encode(text.as_str(), false)
                .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;

            let mut input_ids: Vec<u32> = enc.get_ids().to_vec();
            input_ids.truncate(max_len);

            // Next-token prediction needs at least one transition
            if input_ids.len() < 2 {
                continue;
            }

            let real_len = input_ids.len();
            let mut attention_mask = vec![1u32; real_len];
            while input_ids.len() < max_len {
                input_ids.push(PAD_ID);
                attention_mask.push(0);
            }

            samples.push(LmSample { input_ids, attention_mask });
        }

        tracing::info!("Tokenised {} of {} text records", samples.len(), texts.len());
        Ok(samples)
    }

    fn fit(&mut self, train: Vec<LmSample>, val: Vec<LmSample>) -> Result<()> {
        let train_dataset = LmDataset::new(train);
        let val_dataset   = LmDataset::new(val);
        run_training(&self.cfg, train_dataset, val_dataset, &self.ckpt)
    }

    fn save(&self, dir: &str) -> Result<()> {
        // Weights are checkpointed per epoch during fit();
        // here we persist the run config so inference can
        // rebuild the exact architecture.
        debug_assert_eq!(dir, self.cfg.checkpoint_dir);
        self.ckpt.save_config(&self.cfg)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::tokenizer_store::TokenizerStore;

    fn engine_with_tmp_store() -> (BurnLmEngine, tempfile::TempDir) {
        let dir   = tempfile::tempdir().unwrap();
        let store = TokenizerStore::new(dir.path().to_str().unwrap());
        let texts = vec!["find the value of x given 2 x = 8".to_string()];
        let tok   = store.load_or_build(&texts, 100).unwrap();

        let mut cfg = TrainConfig::default();
        cfg.max_seq_len = 16;
        cfg.checkpoint_dir = dir.path().to_str().unwrap().to_string();

        let ckpt = CheckpointManager::new(&cfg.checkpoint_dir);
        (BurnLmEngine::new(cfg, tok, ckpt), dir)
    }

    #[test]
    fn test_tokenize_pads_to_max_seq_len() {
        let (engine, _dir) = engine_with_tmp_store();
        let samples = engine
            .tokenize(&["find the value of x".to_string()])
            .unwrap();

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].input_ids.len(), 16);
        assert_eq!(samples[0].attention_mask.len(), 16);
        assert!(samples[0].token_count() < 16);
    }

    #[test]
    fn test_tokenize_drops_degenerate_records() {
        let (engine, _dir) = engine_with_tmp_store();
        // One-word record has no next-token transition
        let samples = engine.tokenize(&["x".to_string()]).unwrap();
        assert!(samples.is_empty());
    }
}
