// ============================================================
// Layer 4 — Text Chunker
// ============================================================
// Splits long cleaned papers into overlapping windows of words.
//
// The model has a maximum input length (max_seq_len) and a
// whole exam paper is far longer than that. Truncating would
// throw most of the corpus away, so instead each paper becomes
// a series of sliding windows: `chunk_size` words per window,
// adjacent windows sharing `overlap` words so no question is
// split clean across a boundary.
//
// Example with chunk_size=5, overlap=2 (stride = 3):
//   Paper:   "A B C D E F G H I J"
//   Chunk 1: "A B C D E"
//   Chunk 2: "D E F G H"
//   Chunk 3: "G H I J"

pub struct Chunker {
    /// Target number of words per chunk
    chunk_size: usize,
    /// Number of words shared between adjacent chunks
    overlap: usize,
}

impl Chunker {
    /// # Panics
    /// Panics if overlap >= chunk_size — the stride would be
    /// zero and chunking would never advance.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        assert!(
            overlap < chunk_size,
            "overlap ({}) must be less than chunk_size ({})",
            overlap,
            chunk_size
        );
        Self { chunk_size, overlap }
    }

    /// Split text into overlapping word-level chunks.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let stride = self.chunk_size.saturating_sub(self.overlap);

        let mut chunks = Vec::new();
        let mut start  = 0usize;

        loop {
            let end = (start + self.chunk_size).min(words.len());
            chunks.push(words[start..end].join(" "));

            if end == words.len() {
                break;
            }
            start += stride;
        }

        chunks
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_chunking() {
        let c      = Chunker::new(5, 2);
        let chunks = c.chunk("a b c d e f g h i j");
        assert_eq!(chunks[0], "a b c d e");
        assert!(chunks.len() > 1);
    }

    #[test]
    fn test_adjacent_chunks_overlap() {
        let c      = Chunker::new(4, 2);
        let chunks = c.chunk("a b c d e f");
        assert_eq!(chunks[0], "a b c d");
        assert!(chunks[1].starts_with("c d"));
    }

    #[test]
    fn test_short_text_gives_one_chunk() {
        let c      = Chunker::new(100, 10);
        let chunks = c.chunk("just a few words");
        assert_eq!(chunks, vec!["just a few words"]);
    }

    #[test]
    fn test_empty_text_gives_no_chunks() {
        let c = Chunker::new(5, 2);
        assert!(c.chunk("").is_empty());
    }

    #[test]
    #[should_panic]
    fn test_overlap_must_be_less_than_chunk_size() {
        let _ = Chunker::new(5, 5);
    }
}
