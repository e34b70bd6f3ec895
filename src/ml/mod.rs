// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one
// (and the thin Dataset/Batcher adapters in Layer 4).
//
// What's in this layer:
//
//   model.rs     — The causal transformer LM architecture:
//                  token + position embeddings, causal-masked
//                  multi-head self-attention blocks, GELU
//                  feed-forward networks, layer norm, residual
//                  connections, and an LM head over the vocab.
//
//   trainer.rs   — The training loop: forward pass, next-token
//                  cross-entropy, Adam with weight decay and
//                  linear warmup, per-epoch validation,
//                  metrics, and checkpointing.
//
//   engine.rs    — The FineTuneEngine implementation gluing
//                  tokenisation and the training loop together
//                  behind the Layer 3 trait.
//
//   generator.rs — Greedy autoregressive decoding from a
//                  saved checkpoint.
//
// Reference: Vaswani et al. (2017) Attention Is All You Need

/// Causal transformer language-model architecture
pub mod model;

/// Full training loop with validation and checkpointing
pub mod trainer;

/// FineTuneEngine implementation backed by Burn
pub mod engine;

/// Greedy decoding from a fine-tuned checkpoint
pub mod generator;
