// ============================================================
// Layer 4 — Formula Map
// ============================================================
// An exact-string lookup table from a raw extracted formula
// token sequence to its LaTeX equivalent, loaded once per batch
// run from a JSON object file:
//
//   {
//     "3x + 4y = 7": "3x+4y=7_{latex}",
//     "f(x) = x^2":  "f(x) = x^{2}"
//   }
//
// Keys are literal substrings, not patterns. A candidate
// formula with no entry is not an error — the substring is
// simply left unchanged.
//
// A missing or malformed mapping file IS an error, and it is
// raised before any PDF is processed so a bad map never
// produces a half-converted corpus.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Read-only formula → LaTeX substitution table.
#[derive(Debug, Clone, Default)]
pub struct FormulaMap {
    entries: HashMap<String, String>,
}

impl FormulaMap {
    /// Load the map from a JSON object file of string → string.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read formula map '{}'", path.display()))?;

        let entries: HashMap<String, String> = serde_json::from_str(&json)
            .with_context(|| format!("Malformed formula map '{}'", path.display()))?;

        tracing::info!("Loaded formula map with {} entries", entries.len());
        Ok(Self { entries })
    }

    /// Build a map directly from pairs (used by tests).
    pub fn from_entries<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Exact-match lookup of a candidate formula substring.
    pub fn get(&self, raw: &str) -> Option<&str> {
        self.entries.get(raw).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_exact_match_only() {
        let map = FormulaMap::from_entries([("3x + 4y = 7", "3x+4y=7_{latex}")]);
        assert_eq!(map.get("3x + 4y = 7"), Some("3x+4y=7_{latex}"));
        // Differently spaced variant is a different key
        assert_eq!(map.get("3 x + 4 y = 7"), None);
    }

    #[test]
    fn test_load_from_json_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"a + b": "a+b"}}"#).unwrap();

        let map = FormulaMap::load(f.path()).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a + b"), Some("a+b"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "not json at all").unwrap();
        assert!(FormulaMap::load(f.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = Path::new("/definitely/not/here/map.json");
        assert!(FormulaMap::load(path).is_err());
    }
}
