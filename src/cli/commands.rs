// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the four subcommands and their flags. clap's derive
// macros generate help text, missing-argument errors, and type
// conversion.
//
// The From impls at the bottom are the boundary between Layer 1
// and Layer 2 — the application layer never sees clap types.

use clap::{Args, Subcommand, ValueEnum};

use crate::application::preprocess_use_case::PreprocessConfig;
use crate::application::train_use_case::TrainConfig;
use crate::domain::subject::Subject;

/// The top-level subcommands available to the user.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape and clean the raw exam PDFs into per-subject text corpora
    Preprocess(PreprocessArgs),

    /// Fine-tune the language model for one subject
    Train(TrainArgs),

    /// Generate a continuation of a prompt from a trained checkpoint
    Generate(GenerateArgs),

    /// Convert a single PDF to a LaTeX (.tex) file
    Convert(ConvertArgs),
}

/// CLI-facing subject choice; converted to the domain enum at
/// the layer boundary.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SubjectArg {
    Methods,
    Specialist,
}

impl From<SubjectArg> for Subject {
    fn from(s: SubjectArg) -> Self {
        match s {
            SubjectArg::Methods    => Subject::Methods,
            SubjectArg::Specialist => Subject::Specialist,
        }
    }
}

/// All arguments for the `preprocess` command.
#[derive(Args, Debug)]
pub struct PreprocessArgs {
    /// Directory containing raw exam PDFs
    #[arg(long, default_value = "data/raw")]
    pub raw_dir: String,

    /// Root directory for the cleaned per-subject corpora
    #[arg(long, default_value = "data/processed")]
    pub processed_dir: String,

    /// JSON file mapping raw formula substrings to LaTeX;
    /// omit to skip formula substitution
    #[arg(long)]
    pub formula_map: Option<String>,

    /// Match formulas against raw spacing (before the spacing
    /// rules) instead of the whitespace-normalised text
    #[arg(long, default_value_t = false)]
    pub match_before_spacing: bool,
}

impl From<PreprocessArgs> for PreprocessConfig {
    fn from(a: PreprocessArgs) -> Self {
        PreprocessConfig {
            raw_dir:              a.raw_dir,
            processed_dir:        a.processed_dir,
            formula_map_path:     a.formula_map,
            match_before_spacing: a.match_before_spacing,
        }
    }
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Which subject's corpus and checkpoint to use
    #[arg(long, value_enum)]
    pub subject: SubjectArg,

    /// Root of the cleaned per-subject corpora
    #[arg(long, default_value = "data/processed")]
    pub processed_dir: String,

    /// Root directory for per-subject model checkpoints
    #[arg(long, default_value = "models")]
    pub models_dir: String,

    /// Maximum number of tokens per input sequence
    #[arg(long, default_value_t = 512)]
    pub max_seq_len: usize,

    /// Number of samples per forward pass
    #[arg(long, default_value_t = 8)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Peak learning rate (after warmup)
    #[arg(long, default_value_t = 5e-5)]
    pub lr: f64,

    /// Steps of linear learning-rate warmup
    #[arg(long, default_value_t = 500)]
    pub warmup_steps: usize,

    /// Adam weight-decay coefficient
    #[arg(long, default_value_t = 0.01)]
    pub weight_decay: f64,

    /// Log training loss every N optimisation steps
    #[arg(long, default_value_t = 10)]
    pub logging_steps: usize,

    /// Seed for the shuffle/split and data-loader ordering
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Hidden dimension of the transformer (d_model)
    #[arg(long, default_value_t = 256)]
    pub d_model: usize,

    /// Number of attention heads (d_model must divide evenly)
    #[arg(long, default_value_t = 8)]
    pub num_heads: usize,

    /// Number of stacked decoder layers
    #[arg(long, default_value_t = 6)]
    pub num_layers: usize,

    /// Inner dimension of the feed-forward network
    #[arg(long, default_value_t = 1024)]
    pub d_ff: usize,

    /// Dropout probability during training
    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// Total number of unique tokens the model can recognise
    #[arg(long, default_value_t = 30522)]
    pub vocab_size: usize,
}

/// Resolve per-subject directories and build the application
/// config. This is where `--subject methods` becomes
/// `data/processed/methods` + `models/methods`.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        let subject: Subject = a.subject.into();
        TrainConfig {
            data_dir:       format!("{}/{}", a.processed_dir, subject.dir_name()),
            checkpoint_dir: format!("{}/{}", a.models_dir, subject.dir_name()),
            max_seq_len:    a.max_seq_len,
            batch_size:     a.batch_size,
            epochs:         a.epochs,
            lr:             a.lr,
            warmup_steps:   a.warmup_steps,
            weight_decay:   a.weight_decay,
            logging_steps:  a.logging_steps,
            seed:           a.seed,
            d_model:        a.d_model,
            num_heads:      a.num_heads,
            num_layers:     a.num_layers,
            d_ff:           a.d_ff,
            dropout:        a.dropout,
            vocab_size:     a.vocab_size,
        }
    }
}

/// All arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Which subject's checkpoint to load
    #[arg(long, value_enum)]
    pub subject: SubjectArg,

    /// The prompt to continue
    #[arg(long)]
    pub prompt: String,

    /// Root directory for per-subject model checkpoints
    #[arg(long, default_value = "models")]
    pub models_dir: String,

    /// Maximum number of tokens to generate
    #[arg(long, default_value_t = 100)]
    pub max_new_tokens: usize,
}

/// All arguments for the `convert` command.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the PDF file to convert (e.g. 'exam_2021.pdf')
    #[arg(long, required = true)]
    pub pdf: String,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_args_resolve_subject_directories() {
        let args = TrainArgs {
            subject:       SubjectArg::Specialist,
            processed_dir: "data/processed".to_string(),
            models_dir:    "models".to_string(),
            max_seq_len:   512,
            batch_size:    8,
            epochs:        10,
            lr:            5e-5,
            warmup_steps:  500,
            weight_decay:  0.01,
            logging_steps: 10,
            seed:          42,
            d_model:       256,
            num_heads:     8,
            num_layers:    6,
            d_ff:          1024,
            dropout:       0.1,
            vocab_size:    30522,
        };

        let cfg: TrainConfig = args.into();
        assert_eq!(cfg.data_dir, "data/processed/specialist");
        assert_eq!(cfg.checkpoint_dir, "models/specialist");
    }
}
