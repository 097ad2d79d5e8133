use std::io;

use anyhow::Context;
use log::{info, warn};

use bitmlp::evaluate::run_prompt;
use bitmlp::{Network, TaskConfig};

use super::train::train_model;

pub fn run(config: &TaskConfig) -> anyhow::Result<()> {
    let path = &config.model_file_name;
    let network = if path.exists() {
        info!("loading existing model from {}", path.display());
        let network =
            Network::load_json(path).with_context(|| format!("loading {}", path.display()))?;
        let matches_config = network.input_size == config.input_bit_amount
            && network.output_size == config.output_size;
        if !matches_config {
            warn!(
                "model sizes (input {}, output {}) do not match config (input {}, output {}); \
                 consider deleting {} to retrain",
                network.input_size,
                network.output_size,
                config.input_bit_amount,
                config.output_size,
                path.display()
            );
        }
        network
    } else {
        train_model(config)?
    };

    run_prompt(&network, network.input_size, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
