use crate::error::{MlpError, Result};

pub const DEFAULT_BATCH_SIZE: usize = 64;
pub const DEFAULT_REPORT_EVERY: usize = 100;

/// Hyperparameters for one [`Trainer`](crate::train::Trainer) run.
///
/// # Fields
/// - `epochs`        — epoch budget; training may stop earlier on convergence
/// - `learning_rate` — scales every gradient contribution
/// - `batch_size`    — examples per batch; also the divisor applied to each
///                     batch's accumulated update, even for a short last batch
/// - `report_every`  — progress is reported on epoch 1, the last epoch and
///                     every multiple of this value
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub batch_size: usize,
    pub report_every: usize,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with the default batch size and report interval.
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            batch_size: DEFAULT_BATCH_SIZE,
            report_every: DEFAULT_REPORT_EVERY,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_report_every(mut self, report_every: usize) -> Self {
        self.report_every = report_every;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(MlpError::Config("batch size must be at least 1".into()));
        }
        if self.report_every == 0 {
            return Err(MlpError::Config("report interval must be at least 1".into()));
        }
        Ok(())
    }

    pub(crate) fn should_report(&self, epoch: usize) -> bool {
        epoch == 1 || epoch == self.epochs || epoch % self.report_every == 0
    }
}
