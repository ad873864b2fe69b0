// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// `clap` and hands the work to Layer 2 (application).
//
//   1. `train`    — trains on a CSV matrix and exports the snapshots
//   2. `describe` — prints the generator and discriminator layouts
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, DescribeArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "tabular-gan",
    version = "0.1.0",
    about = "Train a small GAN that synthesises rows resembling a numeric CSV matrix."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route the subcommand to its use case. Nothing is computed here.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Describe(args) => run_describe(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on: {}", args.data.display());

    let outcome = TrainUseCase::new(args.into()).execute()?;

    println!("{}", outcome.summary);
    println!(
        "Training complete. {} snapshots written to {}",
        outcome.snapshots,
        outcome.archive_path.display()
    );
    println!("Session log: {}", outcome.log_path.display());
    Ok(())
}

fn run_describe(args: DescribeArgs) -> Result<()> {
    use crate::application::describe_use_case::DescribeUseCase;

    let summary = DescribeUseCase::new(args.into()).execute()?;
    println!("{summary}");
    Ok(())
}
