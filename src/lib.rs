pub mod activation;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod evaluate;
pub mod experiment;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use config::TaskConfig;
pub use dashboard::{Dashboard, LogRenderer, Renderer, TerminalRenderer};
pub use data::{TrainingData, TrainingExample};
pub use error::{MlpError, Result};
pub use experiment::{ExperimentConfig, Orchestrator, RunStatus, TrainingResult};
pub use math::matrix::Matrix;
pub use network::Network;
pub use train::{EpochStats, TrainConfig, TrainOutcome, Trainer};
