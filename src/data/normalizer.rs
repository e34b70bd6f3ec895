// ============================================================
// Layer 4 — Text Normalizer
// ============================================================
// Cleans raw text extracted from exam PDFs before it is written
// to the processed corpus.
//
// PDF-to-text extraction leaves predictable artifacts:
//   - "Page 12" footer lines from page numbering
//   - isolated header/footer words on their own line
//   - Unicode ligatures (ﬁ, ﬂ, ﬀ) instead of letter pairs
//   - OCR-style confusion of l/I with the digit 1
//   - glued tokens like "3x" where the layout dropped a space
//   - ragged whitespace and newlines
//
// The pipeline is an ordered list of named rules — later rules
// operate on the output of earlier ones, and the order is part
// of the contract. Every rule is a pure function over strings,
// independently testable, and total: no rule can fail on
// well-formed input.
//
// When a FormulaMap is supplied, candidate formula spans are
// matched and substituted with their LaTeX equivalents. The
// stage at which this runs is selectable (see FormulaStage).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::formula_map::FormulaMap;

// Compiled once, shared across all documents in a run.
static PAGE_FOOTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*Page\s*\d+\s*$").unwrap());
static ISOLATED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*[A-Za-z]+\s*$").unwrap());
static DIGIT_THEN_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d)([a-zA-Z])").unwrap());
static LETTER_THEN_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-zA-Z])(\d)").unwrap());
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").unwrap());

// A candidate formula: token (op token)+ where a token is made
// of letters, digits, underscore, parentheses, caret, or braces,
// and an operator may be surrounded by spaces. Matching is
// non-overlapping, left-to-right, greedy.
static FORMULA_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_(){}^]+(?:\s*[-+*/=]\s*[A-Za-z0-9_(){}^]+)+").unwrap());

/// Where in the pipeline formula substitution runs.
///
/// The upstream tooling matched formulas against text that had
/// already been whitespace-normalised, while mapping files in
/// the wild are written against raw spacing. Both orderings are
/// supported; `AfterSpacing` is the compatible default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormulaStage {
    /// Match on the fully collapsed text (after all other rules).
    #[default]
    AfterSpacing,
    /// Match right after the l/I heuristic, before digit/letter
    /// spacing — so mapping keys written against raw spacing hit.
    /// Replacement strings still pass through the later spacing
    /// rules.
    BeforeSpacing,
}

/// The ordered cleaning pipeline.
pub struct Normalizer {
    formula_map:   Option<FormulaMap>,
    formula_stage: FormulaStage,
}

impl Normalizer {
    /// A normalizer with no formula substitution.
    pub fn new() -> Self {
        Self { formula_map: None, formula_stage: FormulaStage::default() }
    }

    /// A normalizer that substitutes formulas at the given stage.
    pub fn with_formula_map(map: FormulaMap, stage: FormulaStage) -> Self {
        Self { formula_map: Some(map), formula_stage: stage }
    }

    /// Run the full rule pipeline. Empty input short-circuits to
    /// empty output. Pure and total — this can never fail.
    pub fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        // Rules 1-4: structural strips and character fixes
        let text = Self::strip_page_footers(raw);
        let text = Self::strip_isolated_words(&text);
        let text = Self::expand_ligatures(&text);
        let mut text = Self::heuristic_digit_one(&text);

        if self.formula_stage == FormulaStage::BeforeSpacing {
            text = self.apply_formula_map(&text);
        }

        // Rules 5-6: spacing normalisation
        let text = Self::space_digit_letter(&text);
        let mut text = Self::collapse_whitespace(&text);

        if self.formula_stage == FormulaStage::AfterSpacing {
            text = self.apply_formula_map(&text);
        }

        text
    }

    // ─── Rule 1 ───────────────────────────────────────────────────────────────
    /// Drop lines that are entirely whitespace + "Page" + digits —
    /// page-number footers.
    pub fn strip_page_footers(text: &str) -> String {
        PAGE_FOOTER.replace_all(text, "").into_owned()
    }

    // ─── Rule 2 ───────────────────────────────────────────────────────────────
    /// Drop lines consisting entirely of a single alphabetic word —
    /// isolated header/footer words the extraction emits on their
    /// own line.
    pub fn strip_isolated_words(text: &str) -> String {
        ISOLATED_WORD.replace_all(text, "").into_owned()
    }

    // ─── Rule 3 ───────────────────────────────────────────────────────────────
    /// Expand the fi/fl/ff ligature characters to letter pairs.
    /// Only the single-pair ligatures are handled.
    pub fn expand_ligatures(text: &str) -> String {
        text.replace('\u{FB01}', "fi")  // ﬁ
            .replace('\u{FB02}', "fl")  // ﬂ
            .replace('\u{FB00}', "ff")  // ﬀ
    }

    // ─── Rule 4 ───────────────────────────────────────────────────────────────
    /// OCR heuristic: "l " and "I " become "1 ". Exam papers are
    /// digit-heavy, so an isolated l/I before a space is usually
    /// the digit one. Known to misfire on the pronoun "I"; kept
    /// for compatibility with the existing corpus.
    pub fn heuristic_digit_one(text: &str) -> String {
        text.replace("l ", "1 ").replace("I ", "1 ")
    }

    // ─── Rule 5 ───────────────────────────────────────────────────────────────
    /// Insert a space at every digit→letter and letter→digit
    /// boundary, un-gluing tokens like "3x".
    pub fn space_digit_letter(text: &str) -> String {
        let text = DIGIT_THEN_LETTER.replace_all(text, "$1 $2");
        LETTER_THEN_DIGIT.replace_all(&text, "$1 $2").into_owned()
    }

    // ─── Rule 6 ───────────────────────────────────────────────────────────────
    /// Collapse every whitespace run (including newlines) into a
    /// single ASCII space and trim the edges. Idempotent.
    pub fn collapse_whitespace(text: &str) -> String {
        WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
    }

    // ─── Rule 7 ───────────────────────────────────────────────────────────────
    /// Substitute candidate formula spans via the exact-match map.
    /// A span with no entry is left unchanged (a lookup miss is
    /// not an error). No-op when no map is configured.
    fn apply_formula_map(&self, text: &str) -> String {
        let Some(map) = &self.formula_map else {
            return text.to_string();
        };

        FORMULA_SPAN
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let span = &caps[0];
                match map.get(span) {
                    Some(latex) => latex.to_string(),
                    None        => span.to_string(),
                }
            })
            .into_owned()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_short_circuits() {
        assert_eq!(Normalizer::new().normalize(""), "");
    }

    #[test]
    fn test_page_footer_lines_are_stripped() {
        let out = Normalizer::new().normalize("Question 1\nPage 12\nQuestion 2");
        assert_eq!(out, "Question 1 Question 2");
    }

    #[test]
    fn test_page_footer_is_case_sensitive() {
        // "page 12" is not a footer under the rule
        let out = Normalizer::strip_page_footers("page 12\n");
        assert!(out.contains("page 12"));
    }

    #[test]
    fn test_isolated_word_lines_are_stripped() {
        let out = Normalizer::new().normalize("Hello\nfind x given 2 x");
        assert_eq!(out, "find x given 2 x");
    }

    #[test]
    fn test_ligatures_expand_to_letter_pairs() {
        assert_eq!(Normalizer::expand_ligatures("ﬁle"), "file");
        assert_eq!(Normalizer::expand_ligatures("ﬂow"), "flow");
        assert_eq!(Normalizer::expand_ligatures("eﬀort"), "effort");
    }

    #[test]
    fn test_digit_one_heuristic() {
        assert_eq!(Normalizer::heuristic_digit_one("l 5"), "1 5");
        // Misfires on the pronoun by design of the source corpus
        assert_eq!(Normalizer::heuristic_digit_one("I think"), "1 think");
    }

    #[test]
    fn test_glued_tokens_are_spaced() {
        assert_eq!(Normalizer::space_digit_letter("3x"), "3 x");
        assert_eq!(Normalizer::space_digit_letter("x3"), "x 3");
        assert_eq!(Normalizer::space_digit_letter("1a2b"), "1 a 2 b");
    }

    #[test]
    fn test_collapse_whitespace_is_idempotent() {
        let once  = Normalizer::collapse_whitespace("a \n\t b   c ");
        let twice = Normalizer::collapse_whitespace(&once);
        assert_eq!(once, "a b c");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_ligature_expansion_is_idempotent() {
        let once  = Normalizer::expand_ligatures("ﬁnd the ﬂux");
        let twice = Normalizer::expand_ligatures(&once);
        assert_eq!(once, twice);
    }

    // The l/I heuristic must run BEFORE digit/letter spacing.
    // "x3l 7": heuristic first gives "x31 7" then spacing gives
    // "x 31 7". The reverse order would give "x 3 1 7".
    #[test]
    fn test_digit_one_runs_before_spacing() {
        assert_eq!(Normalizer::new().normalize("x3l 7"), "x 31 7");
    }

    #[test]
    fn test_full_pipeline_scenario() {
        let out = Normalizer::new().normalize("Page 12\nHello\n3x + 4y = 7");
        assert_eq!(out, "3 x + 4 y = 7");
    }

    #[test]
    fn test_formula_map_after_spacing_misses_raw_key() {
        // The key is written against raw spacing; after the
        // spacing rules the text reads "3 x + 4 y = 7", so in
        // AfterSpacing mode no span matches the key and the text
        // is left unchanged.
        let map = FormulaMap::from_entries([("3x + 4y = 7", "3x+4y=7_{latex}")]);
        let n   = Normalizer::with_formula_map(map, FormulaStage::AfterSpacing);
        assert_eq!(n.normalize("3x + 4y = 7"), "3 x + 4 y = 7");
    }

    #[test]
    fn test_formula_map_before_spacing_hits_raw_key() {
        // In BeforeSpacing mode the span is matched before the
        // spacing rules, so the raw-spaced key hits. The
        // replacement then flows through the remaining rules.
        let map = FormulaMap::from_entries([("3x + 4y = 7", "3x+4y=7_{latex}")]);
        let n   = Normalizer::with_formula_map(map, FormulaStage::BeforeSpacing);
        assert_eq!(n.normalize("3x + 4y = 7"), "3 x+4 y=7_{latex}");
    }

    #[test]
    fn test_formula_lookup_miss_leaves_span_unchanged() {
        let map = FormulaMap::from_entries([("a + b", "a+b")]);
        let n   = Normalizer::with_formula_map(map, FormulaStage::BeforeSpacing);
        // "p - q" is a valid candidate span but has no entry
        assert_eq!(n.normalize("p - q"), "p - q");
    }

    #[test]
    fn test_formula_spans_with_structure_tokens() {
        // Tokens may contain underscores, parens, caret, braces
        let map = FormulaMap::from_entries([("f(x) = x^2", "f(x) = x^{2}")]);
        let n   = Normalizer::with_formula_map(map, FormulaStage::BeforeSpacing);
        let out = n.normalize("f(x) = x^2");
        assert!(out.contains("x^{2}"), "got: {out}");
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let n = Normalizer::new();
        let input = "Page 3\nAlgebra\n2x + ﬁve l 9";
        assert_eq!(n.normalize(input), n.normalize(input));
    }
}
