// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// implementations can be swapped without changing the code
// that uses them. For example:
//   - TextCorpusLoader implements DocumentSource
//   - A future loader over a database could too
//   - The application layer only ever sees DocumentSource
//
// The same applies to the training engine: the data
// preparation code hands plain samples to a FineTuneEngine
// and never touches the underlying ML framework, so the
// engine can be replaced wholesale.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::document::Document;
use crate::domain::sample::LmSample;

// ─── DocumentSource ───────────────────────────────────────────────────────────
/// Any component that can load documents from a source.
///
/// Implementations:
///   - TextCorpusLoader → loads cleaned .txt records from a directory
pub trait DocumentSource {
    /// Load all available documents from this source.
    fn load_all(&self) -> Result<Vec<Document>>;
}

// ─── FineTuneEngine ───────────────────────────────────────────────────────────
/// The seam between data preparation and model training.
///
/// The application layer prepares cleaned text, asks the engine
/// to tokenise it, splits the samples, and hands them back for
/// fitting. No scheduling, batching, or optimisation logic lives
/// outside the engine, so the underlying training framework can
/// be swapped without touching the data-preparation code.
pub trait FineTuneEngine {
    /// Tokenise cleaned text records into fixed-length samples
    /// (truncated and padded to the engine's sequence length).
    fn tokenize(&self, texts: &[String]) -> Result<Vec<LmSample>>;

    /// Run the full optimisation loop over the given split.
    fn fit(&mut self, train: Vec<LmSample>, val: Vec<LmSample>) -> Result<()>;

    /// Persist everything needed to reload the fine-tuned model
    /// (weights, config, vocabulary) under the given directory.
    fn save(&self, dir: &str) -> Result<()>;
}
