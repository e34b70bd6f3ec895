// ============================================================
// Layer 4 — PDF Text Extractor
// ============================================================
// Pulls raw text out of a PDF file using lopdf, page by page.
//
// Failure semantics are deliberately soft:
//   - a page that yields no text (image-only, malformed content
//     stream) contributes the empty string — one bad page never
//     fails the whole document
//   - a file that cannot be opened or parsed at all logs a
//     diagnostic with the path and underlying error, then
//     degrades to the empty string
//
// Callers must treat "" as "nothing usable extracted" and never
// crash a batch over it. The fallible variant is exposed for
// callers (like the convert command) that want the error.

use anyhow::{Context, Result};
use lopdf::Document as PdfDocument;
use std::path::Path;

/// Extract all page text from a PDF, in page order.
/// Never fails: any error is logged and becomes "".
pub fn extract_text(path: &Path) -> String {
    match try_extract_text(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Error extracting text from '{}': {:#}", path.display(), e);
            String::new()
        }
    }
}

/// Extract all page text from a PDF, propagating open/parse
/// failures to the caller. Per-page extraction failures are
/// still swallowed — the page just contributes nothing.
pub fn try_extract_text(path: &Path) -> Result<String> {
    let doc = PdfDocument::load(path)
        .with_context(|| format!("Cannot open PDF '{}'", path.display()))?;

    let mut text = String::new();
    // get_pages() is a BTreeMap keyed by page number, so
    // iteration follows document page order.
    for (page_num, _page_id) in doc.get_pages() {
        match doc.extract_text(&[page_num]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                tracing::debug!(
                    "No text from page {} of '{}': {}",
                    page_num,
                    path.display(),
                    e
                );
            }
        }
    }

    Ok(text)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let text = extract_text(Path::new("/no/such/paper.pdf"));
        assert_eq!(text, "");
    }

    #[test]
    fn test_missing_file_is_an_error_when_propagated() {
        assert!(try_extract_text(Path::new("/no/such/paper.pdf")).is_err());
    }

    #[test]
    fn test_garbage_bytes_degrade_to_empty() {
        let mut f = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        f.write_all(b"this is not a pdf").unwrap();
        assert_eq!(extract_text(f.path()), "");
    }
}
