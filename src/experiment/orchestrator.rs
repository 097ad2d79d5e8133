use std::fs;
use std::path::PathBuf;

use log::{debug, info, warn};
use parking_lot::Mutex;
use rand::{rngs::StdRng, SeedableRng};
use rayon::ThreadPoolBuilder;

use crate::dashboard::Dashboard;
use crate::data::TrainingExample;
use crate::error::{MlpError, Result};
use crate::experiment::experiment_config::ExperimentConfig;
use crate::experiment::report::{best_model_path, rank, ranked_model_path};
use crate::experiment::run::{RunDescriptor, TrainingResult};
use crate::network::Network;
use crate::train::Trainer;

/// Runs a hyperparameter grid, one independent trainer per cell.
pub struct Orchestrator {
    config: ExperimentConfig,
}

impl Orchestrator {
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Orchestrator { config })
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn runs(&self) -> Vec<RunDescriptor> {
        self.config.grid()
    }

    /// Trains every run concurrently on a dedicated pool and returns the
    /// results ranked best-first.
    ///
    /// `dashboard` must have been built from [`Orchestrator::runs`]. Runs share
    /// only `data` (read-only) and the dashboard; each owns its network.
    pub fn run(
        &self,
        data: &[TrainingExample],
        dashboard: &Dashboard,
    ) -> Result<Vec<TrainingResult>> {
        if data.is_empty() {
            return Err(MlpError::EmptyDataset);
        }
        let (input_size, output_size) = (self.config.input_size, self.config.output_size);
        for example in data {
            if example.input.len() != input_size {
                return Err(MlpError::shape("example input", example.input.len(), input_size));
            }
            if example.target.len() != output_size {
                return Err(MlpError::shape("example target", example.target.len(), output_size));
            }
        }

        let runs = self.runs();
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .thread_name(|i| format!("trainer-{i}"))
            .build()
            .map_err(|e| MlpError::Config(format!("cannot build worker pool: {e}")))?;
        info!("launching {} runs on {} threads", runs.len(), self.config.threads);

        let results = Mutex::new(Vec::with_capacity(runs.len()));
        let failures = Mutex::new(Vec::new());
        dashboard.redraw();

        pool.scope(|scope| {
            for run in &runs {
                let results = &results;
                let failures = &failures;
                scope.spawn(move |_| match self.train_one(run, data, dashboard) {
                    Ok(result) => results.lock().push(result),
                    Err(e) => failures.lock().push(e),
                });
            }
        });

        if let Some(e) = failures.into_inner().into_iter().next() {
            return Err(e);
        }

        let mut results = results.into_inner();
        rank(&mut results);
        Ok(results)
    }

    fn train_one(
        &self,
        run: &RunDescriptor,
        data: &[TrainingExample],
        dashboard: &Dashboard,
    ) -> Result<TrainingResult> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run.index as u64)),
            None => StdRng::from_entropy(),
        };
        let (input_size, output_size) = (self.config.input_size, self.config.output_size);
        let network = Network::new(input_size, run.hidden_size, output_size, &mut rng);
        let mut trainer = Trainer::new(network, self.config.train_config(run));

        let outcome = trainer.train_with_progress(data, |stats| {
            dashboard.update(run.index, |snap| snap.record(stats.epoch, stats.average_error));
        })?;
        dashboard.update(run.index, |snap| snap.finish(&outcome));
        debug!(
            "run {} finished: {:e} after {} epochs",
            run.id(),
            outcome.final_error,
            outcome.epochs_run
        );

        Ok(TrainingResult {
            run: run.clone(),
            final_error: outcome.final_error,
            epochs_run: outcome.epochs_run,
            network: trainer.into_network(),
        })
    }

    /// Writes the best model, then clears the results directory and writes
    /// every model into it by rank. `results` must already be ranked.
    ///
    /// Returns the best model's path, or `None` when there were no results.
    pub fn persist(&self, results: &[TrainingResult]) -> Result<Option<PathBuf>> {
        let dir = &self.config.results_dir;
        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        fs::create_dir_all(dir)?;

        let Some(best) = results.first() else {
            warn!("no results were generated");
            return Ok(None);
        };

        let best_path = best_model_path(&self.config.best_model_dir, best);
        best.network.save_json(&best_path)?;
        info!("saved best model {} to {}", best.run.id(), best_path.display());

        for (i, result) in results.iter().enumerate() {
            let path = ranked_model_path(dir, i + 1, result);
            if let Err(e) = result.network.save_json(&path) {
                warn!("could not save {}: {e}", path.display());
            }
        }
        info!("saved {} models to {}", results.len(), dir.display());

        Ok(Some(best_path))
    }
}
