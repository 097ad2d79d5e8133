use crate::network::Network;

/// One cell of the hyperparameter grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RunDescriptor {
    /// Position in the grid; doubles as the dashboard slot.
    pub index: usize,
    pub hidden_size: usize,
    pub learning_rate: f64,
    pub variant: String,
    pub total_epochs: usize,
}

impl RunDescriptor {
    /// Display id, e.g. `[8-0.100-A]`.
    pub fn id(&self) -> String {
        format!("[{}-{:.3}-{}]", self.hidden_size, self.learning_rate, self.variant)
    }

    /// Id with `hidden_width` padding on the hidden size, so dashboard
    /// columns line up.
    pub fn padded_id(&self, hidden_width: usize) -> String {
        format!(
            "[{:<hidden_width$}-{:.3}-{}]",
            self.hidden_size, self.learning_rate, self.variant
        )
    }

    /// Id used in file names; keeps the learning rate unrounded.
    pub fn file_id(&self) -> String {
        format!("[{}-{}-{}]", self.hidden_size, self.learning_rate, self.variant)
    }
}

/// A finished run and the network it produced.
#[derive(Debug, Clone)]
pub struct TrainingResult {
    pub run: RunDescriptor,
    pub final_error: f64,
    pub epochs_run: usize,
    pub network: Network,
}
