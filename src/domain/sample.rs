// ============================================================
// Layer 3 — LmSample Domain Type
// ============================================================
// One fully tokenised and padded causal-LM training sample.
//
// The model learns next-token prediction: given tokens
// [t0 .. tN-1] it predicts [t1 .. tN]. So a sample is just a
// fixed-length token sequence plus an attention mask telling
// the loss which positions are real tokens and which are
// padding.

use serde::{Deserialize, Serialize};

/// Token id reserved for padding. The cross-entropy loss is
/// configured to ignore targets with this id.
pub const PAD_ID: u32 = 0;

/// Token id for out-of-vocabulary words.
pub const UNK_ID: u32 = 1;

/// One fixed-length training sequence.
/// All samples in a run share the same length (max_seq_len),
/// which keeps batching a simple reshape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LmSample {
    /// Token ids, padded with PAD_ID up to max_seq_len
    pub input_ids:      Vec<u32>,
    /// 1 for real tokens, 0 for padding
    pub attention_mask: Vec<u32>,
}

impl LmSample {
    /// Number of real (non-padding) tokens in the sequence.
    pub fn token_count(&self) -> usize {
        self.attention_mask.iter().filter(|&&m| m == 1).count()
    }
}
