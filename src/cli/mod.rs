// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Four commands are supported:
//   1. `train`   — trains the classifier and archives it
//   2. `predict` — classifies one message locally
//   3. `publish` — registers the archive and deploys it
//   4. `score`   — scores messages against the deployment
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, PublishArgs, ScoreArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "sms-spam-pipeline",
    version = "0.1.0",
    about = "Train an SMS spam classifier, publish it to an ML platform, and score messages."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => Self::run_train(args),
            Commands::Predict(args) => Self::run_predict(args),
            Commands::Publish(args) => Self::run_publish(args),
            Commands::Score(args)   => Self::run_score(args),
        }
    }

    /// Handles the `train` subcommand.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on dataset: {}", args.data_path);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Artifacts archived.");
        Ok(())
    }

    /// Handles the `predict` subcommand.
    fn run_predict(args: PredictArgs) -> Result<()> {
        use crate::application::predict_use_case::PredictUseCase;

        let use_case = PredictUseCase::new(&args.artifacts_dir)?;
        let verdict  = use_case.execute(&args.message)?;

        println!(
            "\n{}  ({:.1}% confidence)",
            verdict.label,
            verdict.confidence * 100.0
        );
        Ok(())
    }

    /// Handles the `publish` subcommand.
    fn run_publish(args: PublishArgs) -> Result<()> {
        use crate::application::publish_use_case::PublishUseCase;

        let use_case = PublishUseCase::new(args.into());
        let record   = use_case.execute()?;

        println!("Model registered: {}", record.model_id);
        println!("Deployment ready: {}", record.deployment_id);
        println!("Scoring URL:      {}", record.scoring_url);
        Ok(())
    }

    /// Handles the `score` subcommand.
    fn run_score(args: ScoreArgs) -> Result<()> {
        use crate::application::score_use_case::ScoreUseCase;

        let use_case = ScoreUseCase::new((&args).into());
        let scored   = use_case.execute(&args.messages)?;

        for s in scored {
            println!("{:<8} {}", s.label, s.text);
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_args_move_out_of_parsed_cli() {
        let cli = Cli::try_parse_from([
            "sms-spam-pipeline", "train", "--epochs", "3",
        ])
        .unwrap();

        // Dispatch takes each Args struct out of `command` by value,
        // the same way `run` does
        match cli.command {
            Commands::Train(args) => assert_eq!(args.epochs, 3),
            _ => panic!("expected the train subcommand"),
        }
    }

    #[test]
    fn test_predict_requires_a_message() {
        assert!(Cli::try_parse_from(["sms-spam-pipeline", "predict"]).is_err());
    }

    #[test]
    fn test_score_collects_repeated_message_flags() {
        let cli = Cli::try_parse_from([
            "sms-spam-pipeline", "score",
            "--message", "free entry now",
            "--message", "see you at lunch",
            "--api-key", "k",
            "--instance-id", "i",
            "--base-url", "https://platform.example",
        ])
        .unwrap();

        match cli.command {
            Commands::Score(args) => {
                assert_eq!(args.messages.len(), 2);
                assert_eq!(args.artifacts_dir, "artifacts");
            }
            _ => panic!("expected the score subcommand"),
        }
    }
}
