// ============================================================
// Layer 2 — PreprocessUseCase
// ============================================================
// Orchestrates the corpus build:
//
//   Step 1: Load the formula map, if configured   (Layer 4)
//   Step 2: For each subject, run the batch       (Layer 4)
//           extract → normalize → write pipeline
//           into processed/<subject>/
//
// A bad formula map aborts before any file is touched, so a
// run never leaves behind a half-substituted corpus. Both
// subjects are fed from the same raw directory — the split is
// about keeping the downstream corpora and checkpoints apart.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data::batch::BatchRunner;
use crate::data::formula_map::FormulaMap;
use crate::data::normalizer::{FormulaStage, Normalizer};
use crate::domain::subject::Subject;

// ─── Preprocess Configuration ─────────────────────────────────────────────────
/// Everything a preprocessing run needs, built once from CLI
/// arguments and passed by parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Directory containing the raw exam PDFs
    pub raw_dir: String,

    /// Root of the processed corpus; per-subject subdirectories
    /// are created beneath it
    pub processed_dir: String,

    /// Optional path to the formula → LaTeX JSON map;
    /// absence skips formula substitution entirely
    pub formula_map_path: Option<String>,

    /// Match formulas against raw spacing instead of the
    /// whitespace-normalised text
    pub match_before_spacing: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            raw_dir:             "data/raw".to_string(),
            processed_dir:       "data/processed".to_string(),
            formula_map_path:    None,
            match_before_spacing: false,
        }
    }
}

// ─── PreprocessUseCase ────────────────────────────────────────────────────────
pub struct PreprocessUseCase {
    config: PreprocessConfig,
}

impl PreprocessUseCase {
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    /// Run the full preprocessing pipeline for both subjects.
    /// Returns the total number of PDFs processed.
    pub fn execute(&self) -> Result<usize> {
        let cfg = &self.config;

        // ── Step 1: Load the formula map before touching any file ─────────────
        let formula_map = match &cfg.formula_map_path {
            Some(path) => Some(FormulaMap::load(Path::new(path))?),
            None       => None,
        };
        let stage = if cfg.match_before_spacing {
            FormulaStage::BeforeSpacing
        } else {
            FormulaStage::AfterSpacing
        };

        // ── Step 2: Batch-run each subject's corpus ───────────────────────────
        let raw_dir = Path::new(&cfg.raw_dir);
        let mut total = 0usize;

        for subject in Subject::all() {
            let normalizer = match formula_map.clone() {
                Some(map) => Normalizer::with_formula_map(map, stage),
                None      => Normalizer::new(),
            };

            let out_dir = Path::new(&cfg.processed_dir).join(subject.dir_name());
            tracing::info!("Preprocessing {} corpus into '{}'", subject, out_dir.display());

            let runner = BatchRunner::new(normalizer);
            total += runner.run(raw_dir, &out_dir)?;
        }

        Ok(total)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_both_subject_corpora_are_written() {
        let raw = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        // Unreadable bytes still produce (empty) corpus entries
        fs::write(raw.path().join("exam_2021.pdf"), b"junk").unwrap();

        let cfg = PreprocessConfig {
            raw_dir:       raw.path().to_str().unwrap().to_string(),
            processed_dir: out.path().to_str().unwrap().to_string(),
            ..Default::default()
        };

        let total = PreprocessUseCase::new(cfg).execute().unwrap();
        assert_eq!(total, 2); // one PDF, two subjects

        assert!(out.path().join("methods/exam_2021.txt").exists());
        assert!(out.path().join("specialist/exam_2021.txt").exists());
    }

    #[test]
    fn test_bad_formula_map_aborts_before_processing() {
        let raw = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(raw.path().join("exam.pdf"), b"junk").unwrap();

        let cfg = PreprocessConfig {
            raw_dir:          raw.path().to_str().unwrap().to_string(),
            processed_dir:    out.path().to_str().unwrap().to_string(),
            formula_map_path: Some("/no/such/map.json".to_string()),
            ..Default::default()
        };

        assert!(PreprocessUseCase::new(cfg).execute().is_err());
        // No output was produced for either subject
        assert!(!out.path().join("methods").exists());
        assert!(!out.path().join("specialist").exists());
    }
}
