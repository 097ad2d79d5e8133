/// bitmlp command line
///
/// Every subcommand reads the task configuration (`config.json` by default).
///
///   generate  — write a bit-count or parity training set
///   train     — train one model and save it
///   predict   — load (or train) a model and query it interactively
///   mass      — train the whole hidden-size × learning-rate grid in parallel
///   evaluate  — score every saved model against the training set
mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use bitmlp::TaskConfig;

#[derive(Parser)]
#[command(name = "bitmlp", version, about = "Single-hidden-layer perceptron trainer")]
struct Cli {
    /// Path to the task configuration file.
    #[arg(long, global = true, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a training set sized from the config.
    Generate {
        kind: DatasetKind,
        /// Output file; defaults to the config's training data file.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Train a single model and save it.
    Train,
    /// Query a model from stdin; trains one first if none is saved.
    Predict,
    /// Run the full hyperparameter sweep.
    Mass,
    /// Evaluate every model in a directory.
    Evaluate {
        #[arg(long, default_value = "allModels")]
        models: PathBuf,
        #[arg(long, default_value = "allTrainResults")]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DatasetKind {
    /// Popcount of the input, encoded in `outputSize` bits.
    Count,
    /// Lowest bit of the input.
    Parity,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = TaskConfig::load(&cli.config)
        .with_context(|| format!("please ensure {} exists and is valid", cli.config.display()))?;

    match cli.command {
        Command::Generate { kind, out } => commands::generate::run(&config, kind, out),
        Command::Train => commands::train::run(&config),
        Command::Predict => commands::predict::run(&config),
        Command::Mass => commands::mass::run(&config),
        Command::Evaluate { models, out } => commands::evaluate::run(&config, &models, &out),
    }
}
