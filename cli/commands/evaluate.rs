use std::path::Path;

use anyhow::Context;
use log::info;

use bitmlp::evaluate::evaluate_dir;
use bitmlp::{TaskConfig, TrainingData};

pub fn run(config: &TaskConfig, models: &Path, out: &Path) -> anyhow::Result<()> {
    let path = &config.training_data_file_name;
    let data = TrainingData::load_json(path)
        .with_context(|| format!("loading training data from {}", path.display()))?;

    let reports = evaluate_dir(models, &data, out)
        .with_context(|| format!("evaluating models in {}", models.display()))?;

    for report in &reports {
        println!(
            "{:<40} {:>5}/{:<5} ({:.1}%)",
            report.model_name,
            report.total_correct,
            report.total_tested,
            report.accuracy * 100.0
        );
    }
    info!("all {} model evaluations are complete", reports.len());
    Ok(())
}
