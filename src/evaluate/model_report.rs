use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::data::{from_bits, TrainingData};
use crate::error::Result;
use crate::network::Network;

/// A 0/1 vector alongside the number it encodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryData {
    pub binary: Vec<f64>,
    pub decimal: u64,
}

impl BinaryData {
    pub fn new(binary: Vec<f64>) -> Self {
        let decimal = from_bits(&binary);
        BinaryData { binary, decimal }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub input: BinaryData,
    pub predicted_output: BinaryData,
    pub expected_output: BinaryData,
    pub is_correct: bool,
}

/// How one model performs on a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelReport {
    pub model_name: String,
    pub total_correct: usize,
    pub total_tested: usize,
    pub accuracy: f64,
    pub results: Vec<EvaluationResult>,
}

/// Runs every example through `network`; an example is correct when every
/// rounded output equals its target.
pub fn evaluate(network: &Network, model_name: &str, data: &TrainingData) -> Result<ModelReport> {
    let mut results = Vec::with_capacity(data.len());
    for (input, expected) in data.inputs.iter().zip(&data.outputs) {
        let predicted: Vec<f64> = network.forward(input)?.iter().map(|o| o.round()).collect();
        let is_correct = &predicted == expected;
        results.push(EvaluationResult {
            input: BinaryData::new(input.clone()),
            predicted_output: BinaryData::new(predicted),
            expected_output: BinaryData::new(expected.clone()),
            is_correct,
        });
    }

    let total_correct = results.iter().filter(|r| r.is_correct).count();
    let total_tested = results.len();
    let accuracy = if total_tested > 0 {
        total_correct as f64 / total_tested as f64
    } else {
        0.0
    };

    Ok(ModelReport {
        model_name: model_name.to_string(),
        total_correct,
        total_tested,
        accuracy,
        results,
    })
}

/// Evaluates every `*.json` model in `models_dir` and writes
/// `<out_dir>/<model>_report.json` for each. Files that are not valid models
/// are skipped with a warning.
pub fn evaluate_dir(
    models_dir: &Path,
    data: &TrainingData,
    out_dir: &Path,
) -> Result<Vec<ModelReport>> {
    fs::create_dir_all(out_dir)?;

    let mut paths: Vec<PathBuf> = fs::read_dir(models_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    info!("found {} models to evaluate", paths.len());

    let mut reports = Vec::new();
    for path in paths {
        let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        let name = stem.strip_prefix("model_").unwrap_or(&stem).to_string();

        let network = match Network::load_json(&path) {
            Ok(n) => n,
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                continue;
            }
        };
        let report = match evaluate(&network, &name, data) {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                continue;
            }
        };

        let report_path = out_dir.join(format!("{name}_report.json"));
        fs::write(&report_path, serde_json::to_string(&report)?)?;
        info!(
            "model '{name}': {}/{} correct, report saved to {}",
            report.total_correct,
            report.total_tested,
            report_path.display()
        );
        reports.push(report);
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    // output = sigmoid(20 * x - 10): a confident identity on one bit
    fn identity() -> Network {
        Network::from_parts(1, 1, 1, vec![vec![20.0]], vec![-10.0], vec![vec![20.0]], vec![-10.0])
            .unwrap()
    }

    fn data() -> TrainingData {
        TrainingData {
            input_size: 1,
            output_size: 1,
            inputs: vec![vec![0.0], vec![1.0]],
            outputs: vec![vec![0.0], vec![0.0]],
        }
    }

    #[test]
    fn counts_rounded_matches() {
        let report = evaluate(&identity(), "id", &data()).unwrap();
        assert_eq!(report.total_tested, 2);
        assert_eq!(report.total_correct, 1);
        assert_eq!(report.accuracy, 0.5);
        assert!(report.results[0].is_correct);
        assert_eq!(report.results[1].predicted_output.decimal, 1);
    }

    #[test]
    fn evaluates_a_directory_and_skips_junk() {
        let models = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        identity().save_json(models.path().join("model_id.json")).unwrap();
        fs::write(models.path().join("notes.json"), "{}").unwrap();
        fs::write(models.path().join("readme.txt"), "hi").unwrap();

        let reports = evaluate_dir(models.path(), &data(), out.path()).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].model_name, "id");

        let text = fs::read_to_string(out.path().join("id_report.json")).unwrap();
        assert!(text.contains("\"totalCorrect\":1"));
        assert!(text.contains("\"predictedOutput\""));
    }
}
