use std::path::PathBuf;

use anyhow::Context;
use log::info;

use bitmlp::data::{bit_count, parity};
use bitmlp::TaskConfig;

use crate::DatasetKind;

pub fn run(config: &TaskConfig, kind: DatasetKind, out: Option<PathBuf>) -> anyhow::Result<()> {
    let bits = config.input_bit_amount;
    let data = match kind {
        DatasetKind::Count => bit_count(bits, config.output_size),
        DatasetKind::Parity => parity(bits),
    }
    .context("cannot generate a dataset from this config")?;

    let path = out.unwrap_or_else(|| config.training_data_file_name.clone());
    data.save_json(&path)
        .with_context(|| format!("writing {}", path.display()))?;

    info!(
        "generated {} examples (input {}, output {}) into {}",
        data.len(),
        data.input_size,
        data.output_size,
        path.display()
    );
    Ok(())
}
