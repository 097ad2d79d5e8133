/// Progress report passed to the trainer's callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Epoch budget for this run.
    pub total_epochs: usize,
    /// Mean over all examples of the summed squared output error.
    pub average_error: f64,
}

/// What a finished training run returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainOutcome {
    pub final_error: f64,
    pub epochs_run: usize,
}
