// ============================================================
// Layer 4 — Processed Corpus Loader
// ============================================================
// Loads the cleaned .txt records the batch runner produced for
// one subject. Implements the DocumentSource trait from Layer 3
// so the training pipeline never cares where text comes from.
//
// A missing directory returns an empty corpus with a warning
// rather than an error — the caller decides whether an empty
// corpus is fatal. A single unreadable file is skipped with a
// warning, never aborting the load.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::domain::document::Document;
use crate::domain::traits::DocumentSource;

pub struct TextCorpusLoader {
    /// Path to the per-subject processed directory
    dir: String,
}

impl TextCorpusLoader {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentSource for TextCorpusLoader {
    fn load_all(&self) -> Result<Vec<Document>> {
        let dir = Path::new(&self.dir);

        if !dir.exists() {
            tracing::warn!(
                "Processed directory '{}' does not exist — returning empty corpus",
                self.dir
            );
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();

        for entry in fs::read_dir(dir)
            .with_context(|| format!("Cannot read directory '{}'", self.dir))?
        {
            let entry = entry?;
            let path  = entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }

            match fs::read_to_string(&path) {
                Ok(text) => {
                    let source = path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unknown")
                        .to_string();
                    tracing::debug!("Loaded: {} ({} chars)", source, text.len());
                    docs.push(Document::new(source, text));
                }
                Err(e) => {
                    tracing::warn!("Skipping '{}': {}", path.display(), e);
                }
            }
        }

        tracing::info!("Loaded {} text records from '{}'", docs.len(), self.dir);
        Ok(docs)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_gives_empty_corpus() {
        let loader = TextCorpusLoader::new("/no/such/corpus");
        assert!(loader.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_loads_only_txt_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "find x").unwrap();
        fs::write(dir.path().join("b.pdf"), "binary").unwrap();

        let loader = TextCorpusLoader::new(dir.path().to_str().unwrap());
        let docs   = loader.load_all().unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].source, "a.txt");
        assert_eq!(docs[0].text, "find x");
    }
}
