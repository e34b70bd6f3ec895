// ============================================================
// Layer 3 — Document Domain Type
// ============================================================
// Represents a single exam paper loaded from disk. This is a
// plain data struct with no behaviour — just a source name and
// the extracted text content.
//
// An empty `text` means "nothing usable extracted" — a scanned
// or malformed PDF degrades to an empty Document rather than an
// error, so one bad file can never abort a batch run.

use serde::{Deserialize, Serialize};

/// A raw exam paper loaded from disk.
/// By the time a Document is created, the text has already
/// been pulled out of the PDF container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// The filename or path — kept for traceability
    /// so diagnostics can name the offending file
    pub source: String,

    /// The full extracted text content of the paper
    /// before any cleaning or tokenisation
    pub text: String,
}

impl Document {
    /// Create a new Document with a source path and text content.
    /// Uses impl Into<String> so callers can pass &str or String.
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
        }
    }

    /// True when extraction produced nothing usable.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
