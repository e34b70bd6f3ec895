// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// The entry point for all user interaction, parsed with clap.
// All business logic is delegated to Layer 2 (application).
//
// Four commands:
//   1. `preprocess` — PDFs → cleaned per-subject text corpora
//   2. `train`      — fine-tunes one subject's checkpoint
//   3. `generate`   — decodes a continuation from a checkpoint
//   4. `convert`    — one PDF → one .tex file

pub mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use commands::{Commands, ConvertArgs, GenerateArgs, PreprocessArgs, TrainArgs};
use crate::domain::subject::Subject;

/// The main CLI struct — clap reads the fields and generates
/// argument parsing via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "exam-paper-lm",
    version = "0.1.0",
    about = "Scrape text from exam PDFs, clean it, and fine-tune per-subject language models."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use
    /// case. This layer only routes, never computes.
    ///
    /// The handlers are associated functions: the match moves
    /// the args structs out of `self`, so no handler may also
    /// borrow it.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Preprocess(args) => Self::run_preprocess(args),
            Commands::Train(args)      => Self::run_train(args),
            Commands::Generate(args)   => Self::run_generate(args),
            Commands::Convert(args)    => Self::run_convert(args),
        }
    }

    fn run_preprocess(args: PreprocessArgs) -> Result<()> {
        use crate::application::preprocess_use_case::PreprocessUseCase;

        tracing::info!("Preprocessing PDFs from: {}", args.raw_dir);

        let use_case = PreprocessUseCase::new(args.into());
        let total    = use_case.execute()?;

        println!("Preprocessing complete. {total} files written.");
        Ok(())
    }

    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        let subject: Subject = args.subject.into();
        tracing::info!("Starting fine-tuning for subject: {}", subject);

        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Checkpoint saved.");
        Ok(())
    }

    fn run_generate(args: GenerateArgs) -> Result<()> {
        use crate::application::generate_use_case::GenerateUseCase;

        let subject: Subject = args.subject.into();
        let checkpoint_dir   = format!("{}/{}", args.models_dir, subject.dir_name());

        let use_case = GenerateUseCase::new(checkpoint_dir)?;
        let text     = use_case.generate(&args.prompt, args.max_new_tokens)?;

        println!("\n{text}");
        Ok(())
    }

    /// One-line success or failure diagnostic; a conversion
    /// failure is reported, not propagated.
    fn run_convert(args: ConvertArgs) -> Result<()> {
        use crate::application::convert_use_case::convert_pdf_to_latex;

        match convert_pdf_to_latex(Path::new(&args.pdf)) {
            Ok(tex_path) => {
                println!("Successfully created LaTeX file: {}", tex_path.display());
            }
            Err(e) => {
                println!("Error converting {} to LaTeX: {:#}", args.pdf, e);
            }
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    // Dispatch moves the args out of the parsed Cli value; this
    // exercises the full parse-then-run path end to end.
    #[test]
    fn test_run_dispatches_parsed_convert_args() {
        let cli = Cli::try_parse_from([
            "exam-paper-lm", "convert", "--pdf", "no_such_file.pdf",
        ])
        .unwrap();

        // convert reports failure as a diagnostic, not an error
        assert!(cli.run().is_ok());
    }
}
