// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates fine-tuning for one subject, in order:
//
//   Step 1: Load cleaned .txt records        (Layer 4 - data)
//   Step 2: Chunk into context windows       (Layer 4 - data)
//   Step 3: Build / load corpus tokenizer    (Layer 6 - infra)
//   Step 4: Save run config                  (Layer 6 - infra)
//   Step 5: Tokenize, split 80/20, fit, save (via the engine)
//
// Step 5 goes through the FineTuneEngine trait, so everything
// this file does is pure data preparation and wiring — no
// scheduling, batching, or optimisation logic.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    chunker::Chunker,
    loader::TextCorpusLoader,
    splitter::split_train_val,
};
use crate::domain::traits::{DocumentSource, FineTuneEngine};
use crate::infra::{
    checkpoint::CheckpointManager,
    tokenizer_store::TokenizerStore,
};
use crate::ml::engine::BurnLmEngine;

/// Fraction of samples used for training; the rest validate.
const TRAIN_FRACTION: f64 = 0.8;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for one fine-tuning run, serialisable so
// the checkpoint directory records exactly how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_dir:       String,
    pub checkpoint_dir: String,
    pub max_seq_len:    usize,
    pub batch_size:     usize,
    pub epochs:         usize,
    pub lr:             f64,
    pub warmup_steps:   usize,
    pub weight_decay:   f64,
    pub logging_steps:  usize,
    pub seed:           u64,
    pub d_model:        usize,
    pub num_heads:      usize,
    pub num_layers:     usize,
    pub d_ff:           usize,
    pub dropout:        f64,
    pub vocab_size:     usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_dir:       "data/processed/methods".to_string(),
            checkpoint_dir: "models/methods".to_string(),
            max_seq_len:    512,
            batch_size:     8,
            epochs:         10,
            lr:             5e-5,
            warmup_steps:   500,
            weight_decay:   0.01,
            logging_steps:  10,
            seed:           42,
            d_model:        256,
            num_heads:      8,
            num_layers:     6,
            d_ff:           1024,
            dropout:        0.1,
            vocab_size:     30522,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full fine-tuning pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load the cleaned corpus ───────────────────────────────────
        tracing::info!("Loading processed text from '{}'", cfg.data_dir);
        let loader = TextCorpusLoader::new(&cfg.data_dir);
        let docs   = loader.load_all()?;
        let docs: Vec<_> = docs.into_iter().filter(|d| !d.is_empty()).collect();
        ensure!(
            !docs.is_empty(),
            "No processed text found in '{}' — run 'preprocess' first",
            cfg.data_dir
        );

        // ── Step 2: Chunk into context windows ────────────────────────────────
        // chunk_size = half the sequence length in words leaves
        // room for word-level tokens that split further; 50-word
        // overlap keeps questions intact across boundaries.
        let chunker = Chunker::new(cfg.max_seq_len / 2, 50);
        let chunks: Vec<String> = docs
            .iter()
            .flat_map(|d| chunker.chunk(&d.text))
            .collect();
        tracing::info!("Created {} context chunks from {} papers", chunks.len(), docs.len());

        // ── Step 3: Build / load the corpus tokenizer ─────────────────────────
        let tok_store = TokenizerStore::new(&cfg.checkpoint_dir);
        let tokenizer = tok_store.load_or_build(&chunks, cfg.vocab_size)?;

        // ── Step 4: Save the run config for inference ─────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(cfg)?;

        // ── Step 5: Tokenize, split, fit through the engine seam ──────────────
        let mut engine = BurnLmEngine::new(cfg.clone(), tokenizer, ckpt_manager);
        fine_tune(&mut engine, &chunks, cfg.seed, &cfg.checkpoint_dir)
    }
}

/// The engine-agnostic tail of the pipeline: tokenize, split
/// 80/20 with the run seed, fit, persist. Written against the
/// trait so the training framework can be swapped wholesale.
fn fine_tune<E: FineTuneEngine>(
    engine:  &mut E,
    texts:   &[String],
    seed:    u64,
    out_dir: &str,
) -> Result<()> {
    let samples = engine.tokenize(texts)?;
    ensure!(!samples.is_empty(), "Corpus produced no usable training samples");

    let (train, val) = split_train_val(samples, TRAIN_FRACTION, seed);
    tracing::info!("Split: {} train, {} validation", train.len(), val.len());

    engine.fit(train, val)?;
    engine.save(out_dir)
}
