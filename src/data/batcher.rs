// ============================================================
// Layer 4 — LM Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<LmSample>
// into [batch, seq_len] tensors for the model forward pass.
//
// All sequences are pre-padded to the same length during
// tokenisation, so batching is flatten-then-reshape:
//   [s1_t1 .. s1_tS, s2_t1 .. sN_tS] → [N, S]

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::sample::LmSample;

/// A batch of LM samples ready for the forward pass.
#[derive(Debug, Clone)]
pub struct LmBatch<B: Backend> {
    /// Token id sequences — shape: [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// Attention masks — shape: [batch_size, seq_len]
    /// 1 = real token, 0 = padding
    pub attention_mask: Tensor<B, 2, Int>,
}

/// Holds the target device so tensors land on the right
/// GPU/CPU. Generic over Backend so the same batcher serves
/// the autodiff training backend and the plain validation one.
#[derive(Clone, Debug)]
pub struct LmBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> LmBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<LmSample, LmBatch<B>> for LmBatcher<B> {
    fn batch(&self, items: Vec<LmSample>) -> LmBatch<B> {
        let (batch_size, seq_len, input_flat, mask_flat) = flatten_samples(&items);

        // The data loader never yields an empty batch, but the
        // guard keeps that an invariant of this function rather
        // than of its callers.
        if batch_size == 0 {
            return LmBatch {
                input_ids:      Tensor::empty([0, 0], &self.device),
                attention_mask: Tensor::empty([0, 0], &self.device),
            };
        }

        let input_ids = Tensor::<B, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device,
        ).reshape([batch_size, seq_len]);

        let attention_mask = Tensor::<B, 1, Int>::from_ints(
            mask_flat.as_slice(), &self.device,
        ).reshape([batch_size, seq_len]);

        LmBatch { input_ids, attention_mask }
    }
}

/// Row-major flatten of ids and masks, plus the [batch, seq]
/// shape. All sequences share the same pre-padded length, read
/// off the first sample; empty input yields a 0×0 shape.
fn flatten_samples(items: &[LmSample]) -> (usize, usize, Vec<i32>, Vec<i32>) {
    let Some(first) = items.first() else {
        return (0, 0, Vec::new(), Vec::new());
    };
    let seq_len = first.input_ids.len();

    let input_flat: Vec<i32> = items
        .iter()
        .flat_map(|s| s.input_ids.iter().map(|&x| x as i32))
        .collect();

    let mask_flat: Vec<i32> = items
        .iter()
        .flat_map(|s| s.attention_mask.iter().map(|&x| x as i32))
        .collect();

    (items.len(), seq_len, input_flat, mask_flat)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_preserves_row_major_order() {
        let items = vec![
            LmSample { input_ids: vec![2, 3], attention_mask: vec![1, 1] },
            LmSample { input_ids: vec![4, 0], attention_mask: vec![1, 0] },
        ];

        let (batch_size, seq_len, input_flat, mask_flat) = flatten_samples(&items);
        assert_eq!((batch_size, seq_len), (2, 2));
        assert_eq!(input_flat, vec![2, 3, 4, 0]);
        assert_eq!(mask_flat, vec![1, 1, 1, 0]);
    }

    #[test]
    fn test_flatten_empty_input_has_zero_shape() {
        let (batch_size, seq_len, input_flat, mask_flat) = flatten_samples(&[]);
        assert_eq!((batch_size, seq_len), (0, 0));
        assert!(input_flat.is_empty());
        assert!(mask_flat.is_empty());
    }
}
