pub mod experiment_config;
pub mod orchestrator;
pub mod progress;
pub mod report;
pub mod run;

pub use experiment_config::ExperimentConfig;
pub use orchestrator::Orchestrator;
pub use progress::{ProgressSnapshot, RunStatus};
pub use run::{RunDescriptor, TrainingResult};
