// ============================================================
// Layer 2 — Convert Use Case
// ============================================================
// One-shot conversion of a single exam PDF into a LaTeX
// document: extract, normalize, wrap in a minimal preamble, and
// write "<base>.tex" next to the input.
//
// Unlike the batch runner, an unreadable PDF here is an error —
// the user named one specific file and deserves to hear that it
// could not be read.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::extractor;
use crate::data::normalizer::Normalizer;

/// Convert one PDF to a .tex file beside it.
/// Returns the path of the file written.
pub fn convert_pdf_to_latex(pdf_path: &Path) -> Result<PathBuf> {
    let raw     = extractor::try_extract_text(pdf_path)?;
    let cleaned = Normalizer::new().normalize(&raw);

    let tex_path = pdf_path.with_extension("tex");
    fs::write(&tex_path, wrap_latex(&cleaned))
        .with_context(|| format!("Cannot write '{}'", tex_path.display()))?;

    Ok(tex_path)
}

fn wrap_latex(body: &str) -> String {
    format!(
        "\\documentclass{{article}}\n\\begin{{document}}\n{}\n\\end{{document}}\n",
        body
    )
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_latex_produces_complete_document() {
        let doc = wrap_latex("3 x + 4 y = 7");
        assert!(doc.starts_with("\\documentclass{article}"));
        assert!(doc.contains("3 x + 4 y = 7"));
        assert!(doc.trim_end().ends_with("\\end{document}"));
    }

    #[test]
    fn test_unreadable_pdf_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"not a pdf").unwrap();
        assert!(convert_pdf_to_latex(&path).is_err());
    }

    #[test]
    fn test_missing_pdf_is_an_error() {
        assert!(convert_pdf_to_latex(Path::new("/no/such/exam.pdf")).is_err());
    }
}
