use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MlpError, Result};
use crate::experiment::ExperimentConfig;
use crate::train::train_config::{TrainConfig, DEFAULT_BATCH_SIZE, DEFAULT_REPORT_EVERY};

/// Worker threads used when `dispatchers` is `"io"`.
pub const IO_POOL_THREADS: usize = 64;

/// The task configuration file (`config.json`).
///
/// Loaded once at startup and handed by value to whatever needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskConfig {
    pub input_bit_amount: usize,
    pub output_size: usize,
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_hidden_size")]
    pub hidden_size: usize,
    #[serde(default)]
    pub use_int_user_inputs: bool,
    pub model_file_name: PathBuf,
    pub training_data_file_name: PathBuf,
    pub hidden_sizes_to_test: Vec<usize>,
    pub learning_rates_to_test: Vec<f64>,
    /// `"io"` for a wide pool, anything else for one thread per core.
    pub dispatchers: String,
    pub mass_all_model_path: PathBuf,
    pub status_file: PathBuf,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_report_every")]
    pub report_every: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_variants")]
    pub variants: Vec<String>,
}

fn default_epochs() -> usize {
    5000
}

fn default_learning_rate() -> f64 {
    0.1
}

fn default_hidden_size() -> usize {
    6
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_report_every() -> usize {
    DEFAULT_REPORT_EVERY
}

fn default_variants() -> Vec<String> {
    vec!["A".into(), "B".into()]
}

impl TaskConfig {
    /// Reads and parses a config file. Every failure is a `Config` error.
    pub fn load(path: impl AsRef<Path>) -> Result<TaskConfig> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MlpError::Config(format!("cannot read {}: {e}", path.display())))?;
        TaskConfig::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<TaskConfig> {
        let config: TaskConfig =
            serde_json::from_str(text).map_err(|e| MlpError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.input_bit_amount == 0 || self.output_size == 0 || self.hidden_size == 0 {
            return Err(MlpError::Config("layer sizes must be positive".into()));
        }
        if self.hidden_sizes_to_test.contains(&0) {
            return Err(MlpError::Config("hiddenSizesToTest must not contain 0".into()));
        }
        self.train_config().validate()
    }

    /// Worker threads for the experiment pool.
    pub fn pool_threads(&self) -> usize {
        let cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        if self.dispatchers == "io" {
            IO_POOL_THREADS.max(cores)
        } else {
            cores
        }
    }

    /// Hyperparameters for the single-model path.
    pub fn train_config(&self) -> TrainConfig {
        TrainConfig::new(self.epochs, self.learning_rate)
            .with_batch_size(self.batch_size)
            .with_report_every(self.report_every)
    }

    /// The sweep described by this config.
    pub fn experiment(&self) -> ExperimentConfig {
        ExperimentConfig {
            input_size: self.input_bit_amount,
            output_size: self.output_size,
            epochs: self.epochs,
            hidden_sizes: self.hidden_sizes_to_test.clone(),
            learning_rates: self.learning_rates_to_test.clone(),
            variants: self.variants.clone(),
            batch_size: self.batch_size,
            report_every: self.report_every,
            seed: self.seed,
            threads: self.pool_threads(),
            results_dir: self.mass_all_model_path.clone(),
            best_model_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "inputBitAmount": 4,
        "outputSize": 3,
        "modelFileName": "model.json",
        "trainingDataFileName": "trainingData.json",
        "hiddenSizesToTest": [4, 8],
        "learningRatesToTest": [0.1, 0.5],
        "dispatchers": "cpu",
        "massAllModelPath": "allModels",
        "statusFile": "status.txt"
    }"#;

    #[test]
    fn fills_defaults() {
        let config = TaskConfig::from_json(MINIMAL).unwrap();
        assert_eq!(config.epochs, 5000);
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.hidden_size, 6);
        assert_eq!(config.batch_size, 64);
        assert_eq!(config.variants, vec!["A", "B"]);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn missing_field_is_config_error() {
        let err = TaskConfig::from_json(r#"{"inputBitAmount": 4}"#).unwrap_err();
        assert!(matches!(err, MlpError::Config(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TaskConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, MlpError::Config(_)));
    }

    #[test]
    fn io_dispatcher_widens_the_pool() {
        let mut config = TaskConfig::from_json(MINIMAL).unwrap();
        config.dispatchers = "io".into();
        assert!(config.pool_threads() >= IO_POOL_THREADS);
    }

    #[test]
    fn experiment_mirrors_sweep_fields() {
        let exp = TaskConfig::from_json(MINIMAL).unwrap().experiment();
        assert_eq!(exp.hidden_sizes, vec![4, 8]);
        assert_eq!(exp.learning_rates, vec![0.1, 0.5]);
        assert_eq!(exp.input_size, 4);
        assert_eq!(exp.results_dir, PathBuf::from("allModels"));
    }
}
