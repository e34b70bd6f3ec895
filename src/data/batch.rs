// ============================================================
// Layer 4 — Batch Runner
// ============================================================
// The directory-level driver: walks an input directory of PDFs
// and writes one cleaned .txt file per input into an output
// directory.
//
// Per-file contract:
//   extract → normalize → write "<base>.txt" (overwritten if
//   it already exists)
//
// Failure semantics:
//   - extraction failure for one file degrades that file to an
//     empty output and the run continues
//   - the output directory not being creatable, or the input
//     directory not being enumerable, is fatal for the run
//
// Files are matched on a case-insensitive ".pdf" extension; no
// enumeration order is guaranteed. Each file is processed fully
// and independently, so running twice over identical input
// yields byte-identical output.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::data::extractor;
use crate::data::normalizer::Normalizer;

pub struct BatchRunner {
    normalizer: Normalizer,
}

impl BatchRunner {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    /// Process every PDF in `input_dir` into `output_dir`.
    /// Returns the number of files processed.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<usize> {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Cannot create output directory '{}'", output_dir.display())
        })?;

        let entries = fs::read_dir(input_dir).with_context(|| {
            format!("Cannot read input directory '{}'", input_dir.display())
        })?;

        let mut processed = 0usize;

        for entry in entries {
            let entry = entry.with_context(|| {
                format!("Cannot enumerate '{}'", input_dir.display())
            })?;
            let path = entry.path();

            if !is_pdf(&path) {
                continue;
            }

            // Extraction failure has already degraded to "" here;
            // the normalizer short-circuits empty input.
            let raw     = extractor::extract_text(&path);
            let cleaned = self.normalizer.normalize(&raw);

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unnamed");
            let out_path = output_dir.join(format!("{stem}.txt"));

            fs::write(&out_path, &cleaned).with_context(|| {
                format!("Cannot write '{}'", out_path.display())
            })?;

            tracing::debug!(
                "Processed '{}' → '{}' ({} chars)",
                path.display(),
                out_path.display(),
                cleaned.len()
            );
            processed += 1;
        }

        tracing::info!(
            "Batch complete: {} PDFs from '{}' into '{}'",
            processed,
            input_dir.display(),
            output_dir.display()
        );
        Ok(processed)
    }
}

/// Case-insensitive ".pdf" extension match.
fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_is_pdf_is_case_insensitive() {
        assert!(is_pdf(Path::new("exam.pdf")));
        assert!(is_pdf(Path::new("exam.PDF")));
        assert!(!is_pdf(Path::new("exam.txt")));
        assert!(!is_pdf(Path::new("exam")));
    }

    #[test]
    fn test_only_pdfs_are_processed() {
        let input  = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        // Garbage bytes: extraction degrades to empty output,
        // which is exactly the no-crash behaviour under test.
        write_file(input.path(), "paper.PDF", b"not really a pdf");
        write_file(input.path(), "notes.txt", b"ignore me");

        let runner    = BatchRunner::new(Normalizer::new());
        let processed = runner.run(input.path(), output.path()).unwrap();

        assert_eq!(processed, 1);
        assert!(output.path().join("paper.txt").exists());
        assert!(!output.path().join("notes.txt").exists());
    }

    #[test]
    fn test_unreadable_pdf_degrades_to_empty_output() {
        let input  = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_file(input.path(), "broken.pdf", b"\x00\x01garbage");

        let runner = BatchRunner::new(Normalizer::new());
        runner.run(input.path(), output.path()).unwrap();

        let out = fs::read_to_string(output.path().join("broken.txt")).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_missing_input_directory_is_fatal() {
        let output = tempfile::tempdir().unwrap();
        let runner = BatchRunner::new(Normalizer::new());
        assert!(runner.run(Path::new("/no/such/dir"), output.path()).is_err());
    }

    #[test]
    fn test_output_directory_is_created() {
        let input  = tempfile::tempdir().unwrap();
        let base   = tempfile::tempdir().unwrap();
        let output = base.path().join("nested/processed");

        let runner = BatchRunner::new(Normalizer::new());
        runner.run(input.path(), &output).unwrap();
        assert!(output.is_dir());
    }

    #[test]
    fn test_runs_are_deterministic() {
        let input  = tempfile::tempdir().unwrap();
        let out_a  = tempfile::tempdir().unwrap();
        let out_b  = tempfile::tempdir().unwrap();
        write_file(input.path(), "a.pdf", b"junk a");
        write_file(input.path(), "b.pdf", b"junk b");

        let runner = BatchRunner::new(Normalizer::new());
        runner.run(input.path(), out_a.path()).unwrap();
        runner.run(input.path(), out_b.path()).unwrap();

        for name in ["a.txt", "b.txt"] {
            let a = fs::read(out_a.path().join(name)).unwrap();
            let b = fs::read(out_b.path().join(name)).unwrap();
            assert_eq!(a, b);
        }
    }
}
