// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each:
// preprocessing the corpus, fine-tuning a subject model,
// generating from a checkpoint, or converting one PDF.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No UI or printing here (that's Layer 1)
//   - Only workflow coordination
//
// Each use case takes an explicit config value object built
// once from CLI arguments — no ambient global state anywhere.

// PDF corpus → cleaned per-subject .txt files
pub mod preprocess_use_case;

// Cleaned corpus → fine-tuned subject checkpoint
pub mod train_use_case;

// Checkpoint + prompt → generated continuation
pub mod generate_use_case;

// Single PDF → .tex document
pub mod convert_use_case;
