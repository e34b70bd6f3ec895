// ============================================================
// Layer 2 — Generate Use Case
// ============================================================
// Loads a subject's tokenizer and its best checkpoint, then
// greedy-decodes a continuation of a prompt. Useful for
// eyeballing what a fine-tuned model absorbed from its corpus.

use anyhow::Result;
use tokenizers::Tokenizer;

use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::generator::Generator;

pub struct GenerateUseCase {
    tokenizer: Tokenizer,
    generator: Generator,
}

impl GenerateUseCase {
    pub fn new(checkpoint_dir: String) -> Result<Self> {
        let tok_store = TokenizerStore::new(&checkpoint_dir);
        let tokenizer = tok_store.load()?;
        let ckpt      = CheckpointManager::new(&checkpoint_dir);
        let generator = Generator::from_checkpoint(&ckpt)?;
        Ok(Self { tokenizer, generator })
    }

    /// Continue `prompt` for up to `max_new_tokens` tokens.
    pub fn generate(&self, prompt: &str, max_new_tokens: usize) -> Result<String> {
        self.generator.generate(prompt, &self.tokenizer, max_new_tokens)
    }
}
