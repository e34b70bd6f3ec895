// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from raw exam PDFs to GPU-ready tensor batches.
//
// Preprocessing flow (the `preprocess` command):
//
//   .pdf files
//       │
//       ▼
//   extractor         → pulls raw page text out of each PDF
//       │
//       ▼
//   Normalizer        → ordered cleaning rules + formula map
//       │
//       ▼
//   BatchRunner       → writes one .txt per PDF per subject
//
// Training flow (the `train` command):
//
//   .txt corpus
//       │
//       ▼
//   TextCorpusLoader  → reads the cleaned records
//       │
//       ▼
//   Chunker           → overlapping context windows
//       │
//       ▼
//   (engine tokenise) → fixed-length LmSamples
//       │
//       ▼
//   split_train_val   → seeded 80/20 split
//       │
//       ▼
//   LmDataset         → implements Burn's Dataset trait
//       │
//       ▼
//   LmBatcher         → stacks samples into tensor batches
//
// Each module is responsible for exactly one step, so each is
// independently testable and replaceable.

/// Extracts raw text from PDF files page by page
pub mod extractor;

/// Ordered text-cleaning rule pipeline
pub mod normalizer;

/// Exact-string formula → LaTeX substitution table
pub mod formula_map;

/// Directory-level extract-normalize-write driver
pub mod batch;

/// Loads cleaned .txt records for a subject
pub mod loader;

/// Splits long papers into overlapping word windows
pub mod chunker;

/// Implements Burn's Dataset trait for LM samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Seeded shuffle and train/validation split
pub mod splitter;
