use log::{debug, trace};
use rayon::prelude::*;

use crate::data::TrainingExample;
use crate::error::{MlpError, Result};
use crate::network::Network;
use crate::train::epoch_stats::{EpochStats, TrainOutcome};
use crate::train::gradients::BatchGradients;
use crate::train::train_config::TrainConfig;

/// Average error below which training stops early.
pub const CONVERGENCE_THRESHOLD: f64 = 1e-8;

/// Owns a [`Network`] for the duration of training and drives its epochs.
#[derive(Debug)]
pub struct Trainer {
    network: Network,
    config: TrainConfig,
}

impl Trainer {
    pub fn new(network: Network, config: TrainConfig) -> Self {
        Trainer { network, config }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    /// Trains without progress reporting.
    pub fn train(&mut self, data: &[TrainingExample]) -> Result<TrainOutcome> {
        self.train_with_progress(data, |_| {})
    }

    /// Runs up to `config.epochs` epochs of batched backprop over `data`.
    ///
    /// Each epoch splits `data` into contiguous batches whose gradients are
    /// computed in parallel against the weights as they stood at the start
    /// of the epoch. Once every batch is done, the updates are added in batch
    /// order, each divided by `config.batch_size`.
    ///
    /// `progress` is called on epoch 1, on the final epoch, on every multiple
    /// of `config.report_every`, and once more on the epoch where the average
    /// error first drops below [`CONVERGENCE_THRESHOLD`], which ends training.
    ///
    /// NaN or infinite errors are not trapped; they simply carry into later
    /// epochs.
    pub fn train_with_progress<F>(
        &mut self,
        data: &[TrainingExample],
        mut progress: F,
    ) -> Result<TrainOutcome>
    where
        F: FnMut(EpochStats),
    {
        self.config.validate()?;
        self.check_examples(data)?;

        let total_epochs = self.config.epochs;
        let lr = self.config.learning_rate;
        let divisor = self.config.batch_size as f64;
        let mut outcome = TrainOutcome { final_error: 0.0, epochs_run: total_epochs };

        for epoch in 1..=total_epochs {
            let network = &self.network;
            // fan-out; collect() is the join point and keeps batch order
            let contributions: Vec<BatchGradients> = data
                .par_chunks(self.config.batch_size)
                .map(|batch| BatchGradients::compute(network, batch, lr))
                .collect();

            let mut total_error = 0.0;
            for contribution in &contributions {
                total_error += contribution.total_error;
                contribution.apply_to(&mut self.network, divisor);
            }

            let average_error = total_error / data.len() as f64;
            outcome.final_error = average_error;
            trace!("epoch {epoch}/{total_epochs}: error {average_error}");

            let stats = EpochStats { epoch, total_epochs, average_error };
            if self.config.should_report(epoch) {
                progress(stats);
            }

            if average_error < CONVERGENCE_THRESHOLD {
                progress(stats);
                outcome.epochs_run = epoch;
                debug!("converged after {epoch} epochs with error {average_error:e}");
                break;
            }
        }

        Ok(outcome)
    }

    fn check_examples(&self, data: &[TrainingExample]) -> Result<()> {
        if data.is_empty() {
            return Err(MlpError::EmptyDataset);
        }
        let (input_size, output_size) = (self.network.input_size, self.network.output_size);
        for example in data {
            if example.input.len() != input_size {
                return Err(MlpError::shape("example input", example.input.len(), input_size));
            }
            if example.target.len() != output_size {
                return Err(MlpError::shape("example target", example.target.len(), output_size));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xor() -> Vec<TrainingExample> {
        vec![
            TrainingExample::new(vec![0.0, 0.0], vec![0.0]),
            TrainingExample::new(vec![1.0, 1.0], vec![0.0]),
            TrainingExample::new(vec![1.0, 0.0], vec![1.0]),
            TrainingExample::new(vec![0.0, 1.0], vec![1.0]),
        ]
    }

    #[test]
    fn full_batch_epoch_applies_mean_gradient() {
        let data = xor();
        let start = Network::seeded(2, 3, 1, 21);
        let lr = 0.7;

        let full = BatchGradients::compute(&start, &data, lr);
        let mut expected = start.clone();
        full.apply_to(&mut expected, data.len() as f64);

        let mut trainer = Trainer::new(start, TrainConfig::new(1, lr).with_batch_size(data.len()));
        let outcome = trainer.train(&data).unwrap();

        assert_eq!(trainer.network(), &expected);
        assert_eq!(outcome.epochs_run, 1);
        assert!((outcome.final_error - full.total_error / 4.0).abs() < 1e-15);
    }

    #[test]
    fn batches_see_pre_epoch_weights() {
        let data = xor();
        let start = Network::seeded(2, 2, 1, 4);

        let mut expected = start.clone();
        for pair in data.chunks(2) {
            BatchGradients::compute(&start, pair, 0.5).apply_to(&mut expected, 2.0);
        }

        let mut trainer = Trainer::new(start, TrainConfig::new(1, 0.5).with_batch_size(2));
        trainer.train(&data).unwrap();
        assert_eq!(trainer.network(), &expected);
    }

    #[test]
    fn short_last_batch_is_divided_by_nominal_size() {
        let data = xor();
        let start = Network::seeded(2, 2, 1, 9);

        let mut expected = start.clone();
        BatchGradients::compute(&start, &data[..3], 0.5).apply_to(&mut expected, 3.0);
        BatchGradients::compute(&start, &data[3..], 0.5).apply_to(&mut expected, 3.0);

        let mut trainer = Trainer::new(start, TrainConfig::new(1, 0.5).with_batch_size(3));
        trainer.train(&data).unwrap();
        assert_eq!(trainer.network(), &expected);
    }

    #[test]
    fn progress_fires_on_schedule() {
        let mut epochs = Vec::new();
        let mut trainer = Trainer::new(Network::seeded(2, 2, 1, 1), TrainConfig::new(250, 0.5));
        let outcome = trainer
            .train_with_progress(&xor(), |s| {
                assert_eq!(s.total_epochs, 250);
                epochs.push(s.epoch);
            })
            .unwrap();
        assert_eq!(epochs, vec![1, 100, 200, 250]);
        assert_eq!(outcome.epochs_run, 250);
    }

    #[test]
    fn early_stop_halts_at_first_crossing() {
        // a single constant target that a saturated output already matches
        let net =
            Network::from_parts(1, 1, 1, vec![vec![0.0]], vec![0.0], vec![vec![0.0]], vec![20.0])
                .unwrap();
        let data = vec![TrainingExample::new(vec![1.0], vec![1.0])];

        let mut calls = Vec::new();
        let mut trainer = Trainer::new(net, TrainConfig::new(500, 0.1));
        let outcome = trainer.train_with_progress(&data, |s| calls.push(s.epoch)).unwrap();

        assert_eq!(outcome.epochs_run, 1);
        assert!(outcome.final_error < CONVERGENCE_THRESHOLD);
        // scheduled report plus the convergence report, nothing after
        assert_eq!(calls, vec![1, 1]);
    }

    #[test]
    fn rejects_mismatched_examples() {
        let mut trainer = Trainer::new(Network::seeded(2, 2, 1, 0), TrainConfig::new(1, 0.1));
        let bad = vec![TrainingExample::new(vec![1.0], vec![0.0])];
        assert!(matches!(trainer.train(&bad), Err(MlpError::ShapeMismatch { .. })));
        assert!(matches!(trainer.train(&[]), Err(MlpError::EmptyDataset)));
    }
}
