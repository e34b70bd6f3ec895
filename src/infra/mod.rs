// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns used by multiple layers:
//
//   checkpoint.rs      — Model weight + run-config persistence
//                        via Burn's CompactRecorder, with
//                        latest/best epoch pointers.
//
//   tokenizer_store.rs — Corpus vocabulary persistence. Builds
//                        a word-level tokenizer once per
//                        subject and reuses it so token ids
//                        stay stable between training and
//                        generation.
//
//   metrics.rs         — Per-epoch loss/perplexity rows in a
//                        CSV for later analysis.

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Tokenizer building, saving, and loading
pub mod tokenizer_store;

/// Training metrics CSV logger
pub mod metrics;
