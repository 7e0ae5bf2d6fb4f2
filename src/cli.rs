use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nearest-neighbor classifier for Pikachu and Pichu measurements.
#[derive(Parser)]
#[command(
    name = "pokeclass",
    version,
    about = "Classify Pikachu and Pichu measurements by nearest neighbors"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Classify every point in a test-point file.
    ClassifyFile(ClassifyFileArgs),
    /// Classify a single measurement.
    Classify(ClassifyArgs),
    /// Estimate accuracy with repeated random train/test splits.
    Evaluate(EvaluateArgs),
}

/// Labeled reference data shared by all subcommands.
#[derive(clap::Args)]
pub struct DataArgs {
    /// Path to the labeled data file (`width, height, label` per line).
    #[arg(short, long, default_value = "datapoints.txt")]
    pub data: PathBuf,
}

/// Arguments for the `classify-file` subcommand.
#[derive(clap::Args)]
pub struct ClassifyFileArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Path to the test-point file (`<n>. (width, height)` per line).
    #[arg(short, long, default_value = "testpoints.txt")]
    pub tests: PathBuf,

    /// Number of neighbors that vote.
    #[arg(short, default_value_t = 1)]
    pub k: usize,
}

/// Arguments for the `classify` subcommand.
#[derive(clap::Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Width of the measurement, must be >= 0.
    #[arg(long, allow_negative_numbers = true)]
    pub width: f64,

    /// Height of the measurement, must be >= 0.
    #[arg(long, allow_negative_numbers = true)]
    pub height: f64,

    /// Number of neighbors that vote.
    #[arg(short, default_value_t = 1)]
    pub k: usize,
}

/// Arguments for the `evaluate` subcommand.
#[derive(clap::Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Number of random train/test splits.
    #[arg(short, long, default_value_t = 10)]
    pub iterations: usize,

    /// Training samples drawn from each category per split.
    #[arg(long, default_value_t = 50)]
    pub training: usize,

    /// Test samples drawn from each category per split.
    #[arg(long, default_value_t = 25)]
    pub test: usize,

    /// Number of neighbors that vote.
    #[arg(short, default_value_t = 1)]
    pub k: usize,

    /// RNG seed. A random seed is drawn and logged when omitted.
    #[arg(short, long)]
    pub seed: Option<u64>,
}
