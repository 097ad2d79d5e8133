use std::fmt;

use crate::experiment::run::RunDescriptor;
use crate::train::TrainOutcome;

/// Error below which a run that stopped before its budget counts as converged.
pub const CONVERGED_ERROR: f64 = 1e-6;

/// Lifecycle of a run. Ordered so that a status never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunStatus {
    Queued,
    Running,
    Converged,
    Completed,
}

impl RunStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, RunStatus::Converged | RunStatus::Completed)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunStatus::Queued => "QUEUED",
            RunStatus::Running => "RUNNING",
            RunStatus::Converged => "CONVERGED",
            RunStatus::Completed => "COMPLETED",
        };
        // pad() so width specifiers apply
        f.pad(label)
    }
}

/// Live state of one run as shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub run: RunDescriptor,
    pub current_epoch: usize,
    /// `f64::MAX` until the first report so queued runs sort last.
    pub current_error: f64,
    pub previous_error: Option<f64>,
    pub status: RunStatus,
}

impl ProgressSnapshot {
    pub fn new(run: RunDescriptor) -> Self {
        ProgressSnapshot {
            run,
            current_epoch: 0,
            current_error: f64::MAX,
            previous_error: None,
            status: RunStatus::Queued,
        }
    }

    /// Records a progress report; a queued run becomes running.
    pub fn record(&mut self, epoch: usize, error: f64) {
        if self.current_epoch > 0 {
            self.previous_error = Some(self.current_error);
        }
        self.current_epoch = epoch;
        self.current_error = error;
        self.advance(RunStatus::Running);
    }

    /// Records the final outcome and moves to `Converged` or `Completed`.
    pub fn finish(&mut self, outcome: &TrainOutcome) {
        self.record(outcome.epochs_run, outcome.final_error);
        let converged =
            outcome.epochs_run < self.run.total_epochs && outcome.final_error < CONVERGED_ERROR;
        self.advance(if converged { RunStatus::Converged } else { RunStatus::Completed });
    }

    /// `previous - current`; zero until there is a previous report.
    pub fn improvement(&self) -> f64 {
        self.previous_error.map_or(0.0, |prev| prev - self.current_error)
    }

    fn advance(&mut self, next: RunStatus) {
        if next > self.status && !self.status.is_finished() {
            self.status = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(total_epochs: usize) -> ProgressSnapshot {
        ProgressSnapshot::new(RunDescriptor {
            index: 0,
            hidden_size: 2,
            learning_rate: 0.5,
            variant: "A".into(),
            total_epochs,
        })
    }

    #[test]
    fn first_record_starts_the_run() {
        let mut snap = snapshot(100);
        assert_eq!(snap.status, RunStatus::Queued);
        snap.record(1, 0.3);
        assert_eq!(snap.status, RunStatus::Running);
        assert_eq!(snap.improvement(), 0.0);
        snap.record(100, 0.2);
        assert!((snap.improvement() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn early_finish_with_tiny_error_is_converged() {
        let mut snap = snapshot(100);
        snap.finish(&TrainOutcome { final_error: 1e-9, epochs_run: 40 });
        assert_eq!(snap.status, RunStatus::Converged);
        assert_eq!(snap.current_epoch, 40);
    }

    #[test]
    fn full_budget_is_completed_even_when_accurate() {
        let mut snap = snapshot(100);
        snap.finish(&TrainOutcome { final_error: 1e-9, epochs_run: 100 });
        assert_eq!(snap.status, RunStatus::Completed);
    }

    #[test]
    fn finished_status_never_regresses() {
        let mut snap = snapshot(100);
        snap.finish(&TrainOutcome { final_error: 0.4, epochs_run: 100 });
        snap.record(100, 0.4);
        assert_eq!(snap.status, RunStatus::Completed);
    }

    #[test]
    fn status_labels_pad() {
        assert_eq!(format!("{:<9}", RunStatus::Running), "RUNNING  ");
    }
}
