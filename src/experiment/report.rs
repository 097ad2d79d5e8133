use std::cmp::Ordering;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::experiment::run::TrainingResult;

/// Ascending error order with NaN after every number, whatever its sign bit.
pub fn compare_errors(a: f64, b: f64) -> Ordering {
    a.is_nan().cmp(&b.is_nan()).then_with(|| a.total_cmp(&b))
}

/// Sorts results ascending by final error; NaN errors sort last.
pub fn rank(results: &mut [TrainingResult]) {
    results.sort_by(|a, b| compare_errors(a.final_error, b.final_error));
}

/// The final ranked table. Expects `results` already ranked.
pub fn ranked_table(results: &[TrainingResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Rank | Model ID          | Final Error          | Epochs");
    let _ = writeln!(out, "-----|-------------------|----------------------|-------");
    for (i, result) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} | {:<17} | {:<20.16} | {}",
            i + 1,
            result.run.id(),
            result.final_error,
            result.epochs_run
        );
    }
    out
}

pub fn best_model_path(dir: &Path, result: &TrainingResult) -> PathBuf {
    dir.join(format!("best_model_{}.json", result.run.file_id()))
}

/// `rank_<n>_<id>_err_<error>.json` under `dir`.
pub fn ranked_model_path(dir: &Path, rank: usize, result: &TrainingResult) -> PathBuf {
    dir.join(format!("rank_{rank}_{}_err_{}.json", result.run.file_id(), result.final_error))
}
