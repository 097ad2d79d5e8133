pub mod epoch_stats;
pub mod gradients;
pub mod train_config;
pub mod trainer;

pub use epoch_stats::{EpochStats, TrainOutcome};
pub use gradients::BatchGradients;
pub use train_config::TrainConfig;
pub use trainer::{Trainer, CONVERGENCE_THRESHOLD};
