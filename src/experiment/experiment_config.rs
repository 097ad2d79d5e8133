use std::path::PathBuf;

use crate::error::{MlpError, Result};
use crate::experiment::run::RunDescriptor;
use crate::train::TrainConfig;

/// Everything the orchestrator needs to run a sweep.
///
/// # Fields
/// - `input_size` / `output_size` — network shape shared by every run
/// - `hidden_sizes`, `learning_rates`, `variants` — grid axes
/// - `seed`           — when set, run `i` is seeded with `seed + i`
/// - `threads`        — size of the worker pool runs are scheduled on
/// - `results_dir`    — cleared and refilled with every ranked model
/// - `best_model_dir` — where `best_model_<id>.json` is written
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    pub input_size: usize,
    pub output_size: usize,
    pub epochs: usize,
    pub hidden_sizes: Vec<usize>,
    pub learning_rates: Vec<f64>,
    pub variants: Vec<String>,
    pub batch_size: usize,
    pub report_every: usize,
    pub seed: Option<u64>,
    pub threads: usize,
    pub results_dir: PathBuf,
    pub best_model_dir: PathBuf,
}

impl ExperimentConfig {
    /// Cross product hidden size × learning rate × variant, in that nesting order.
    pub fn grid(&self) -> Vec<RunDescriptor> {
        let capacity =
            self.hidden_sizes.len() * self.learning_rates.len() * self.variants.len();
        let mut runs = Vec::with_capacity(capacity);
        for &hidden_size in &self.hidden_sizes {
            for &learning_rate in &self.learning_rates {
                for variant in &self.variants {
                    runs.push(RunDescriptor {
                        index: runs.len(),
                        hidden_size,
                        learning_rate,
                        variant: variant.clone(),
                        total_epochs: self.epochs,
                    });
                }
            }
        }
        runs
    }

    pub fn train_config(&self, run: &RunDescriptor) -> TrainConfig {
        TrainConfig::new(run.total_epochs, run.learning_rate)
            .with_batch_size(self.batch_size)
            .with_report_every(self.report_every)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 || self.output_size == 0 {
            return Err(MlpError::Config("network sizes must be positive".into()));
        }
        if self.hidden_sizes.contains(&0) {
            return Err(MlpError::Config("hidden sizes must be positive".into()));
        }
        if self.threads == 0 {
            return Err(MlpError::Config("worker pool needs at least one thread".into()));
        }
        TrainConfig::new(self.epochs, 0.0)
            .with_batch_size(self.batch_size)
            .with_report_every(self.report_every)
            .validate()
    }
}
