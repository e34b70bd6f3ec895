// ============================================================
// Layer 5 — Generator
// ============================================================
// Greedy autoregressive decoding from a fine-tuned checkpoint:
// feed the prompt, take the argmax of the final position's
// logits, append, repeat. Used by the `generate` command to
// eyeball what a subject model has absorbed from its corpus.

use anyhow::Result;
use burn::prelude::*;
use tokenizers::Tokenizer;

use crate::domain::sample::{PAD_ID, UNK_ID};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{CausalLmConfig, CausalLmModel};

type InferBackend = burn::backend::Wgpu;

pub struct Generator {
    model:       CausalLmModel<InferBackend>,
    max_seq_len: usize,
    device:      burn::backend::wgpu::WgpuDevice,
}

impl Generator {
    /// Rebuild the trained architecture from the saved config
    /// (dropout off for inference) and load the best checkpoint.
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Self> {
        let device = burn::backend::wgpu::WgpuDevice::default();
        let cfg    = ckpt_manager.load_config()?;
        let model_cfg = CausalLmConfig::new(
            cfg.vocab_size, cfg.max_seq_len, cfg.d_model,
            cfg.num_heads, cfg.num_layers, cfg.d_ff, 0.0,
        );
        let model: CausalLmModel<InferBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");
        Ok(Self { model, max_seq_len: cfg.max_seq_len, device })
    }

    /// Greedy-decode up to `max_new_tokens` continuation tokens.
    pub fn generate(
        &self,
        prompt:         &str,
        tokenizer:      &Tokenizer,
        max_new_tokens: usize,
    ) -> Result<String> {
        let enc = tokenizer
            .encode(prompt, false)
            .map_err(|e| anyhow::anyhow!("Prompt tokenise: {e}"))?;

        let mut ids: Vec<u32> = enc.get_ids().to_vec();
        if ids.is_empty() {
            ids.push(UNK_ID);
        }

        for _ in 0..max_new_tokens {
            // Condition on at most the last max_seq_len tokens
            let start  = ids.len().saturating_sub(self.max_seq_len);
            let window = &ids[start..];
            let len    = window.len();

            let input_flat: Vec<i32> = window.iter().map(|&x| x as i32).collect();
            let input = Tensor::<InferBackend, 1, Int>::from_ints(
                input_flat.as_slice(), &self.device,
            ).unsqueeze::<2>(); // [1, len]

            let logits = self.model.forward(input); // [1, len, vocab]
            let [_, _, vocab] = logits.dims();

            // Distribution over the next token = logits at the
            // final position
            let last = logits
                .slice([0..1, len - 1..len, 0..vocab])
                .reshape([vocab]);

            let next: i64 = last.argmax(0).into_scalar().elem::<i64>();
            let next = next as u32;

            // The model signalling padding means it has nothing
            // more to say
            if next == PAD_ID {
                break;
            }
            ids.push(next);
        }

        tokenizer
            .decode(&ids, true)
            .map_err(|e| anyhow::anyhow!("Decode: {e}"))
    }
}
