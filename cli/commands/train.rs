use anyhow::Context;
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use bitmlp::{Network, TaskConfig, Trainer, TrainingData};

/// Loads the dataset, trains one network with the config's hyperparameters
/// and saves it to `modelFileName`.
pub fn train_model(config: &TaskConfig) -> anyhow::Result<Network> {
    let path = &config.training_data_file_name;
    let data = TrainingData::load_json(path).with_context(|| {
        format!("no usable training data at {}; run `bitmlp generate` first", path.display())
    })?;
    info!(
        "training data loaded: {} examples, input {}, output {}",
        data.len(),
        data.input_size,
        data.output_size
    );
    data.check_sizes(config.input_bit_amount, config.output_size)
        .context("training data was generated for a different config")?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let network =
        Network::new(config.input_bit_amount, config.hidden_size, config.output_size, &mut rng);
    let mut trainer = Trainer::new(network, config.train_config());

    info!("starting training...");
    let outcome = trainer.train_with_progress(&data.examples(), |stats| {
        info!(
            "epoch {}/{}: average error {:.12}",
            stats.epoch, stats.total_epochs, stats.average_error
        );
    })?;
    info!("finished after {} epochs, final error {:e}", outcome.epochs_run, outcome.final_error);

    let network = trainer.into_network();
    network
        .save_json(&config.model_file_name)
        .with_context(|| format!("saving {}", config.model_file_name.display()))?;
    info!("model saved to {}", config.model_file_name.display());
    Ok(network)
}

pub fn run(config: &TaskConfig) -> anyhow::Result<()> {
    train_model(config).map(|_| ())
}
