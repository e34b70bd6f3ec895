// ============================================================
// Layer 3 — Exam Subject
// ============================================================
// The pipeline trains one checkpoint per VCE maths subject.
// Subject selects the per-subject subdirectory under both the
// processed-data root and the models root, so the two corpora
// and the two checkpoints never mix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two exam subjects the pipeline produces models for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    /// VCE Mathematical Methods
    Methods,
    /// VCE Specialist Mathematics
    Specialist,
}

impl Subject {
    /// Directory name used under the processed-data root and
    /// the models root, e.g. `data/processed/methods`.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Subject::Methods    => "methods",
            Subject::Specialist => "specialist",
        }
    }

    /// Both subjects, in the order the batch driver processes
    /// them.
    pub fn all() -> [Subject; 2] {
        [Subject::Methods, Subject::Specialist]
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_names_are_distinct() {
        assert_ne!(Subject::Methods.dir_name(), Subject::Specialist.dir_name());
    }

    #[test]
    fn test_display_matches_dir_name() {
        assert_eq!(Subject::Methods.to_string(), "methods");
        assert_eq!(Subject::Specialist.to_string(), "specialist");
    }
}
