use crate::experiment::progress::{ProgressSnapshot, RunStatus};
use crate::experiment::report::compare_errors;

/// Column widths shared by every line of one dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub hidden_width: usize,
    pub epoch_width: usize,
}

impl Layout {
    pub fn for_runs(snapshots: &[ProgressSnapshot]) -> Self {
        let hidden_width = snapshots
            .iter()
            .map(|s| s.run.hidden_size.to_string().len())
            .max()
            .unwrap_or(2);
        let epoch_width = snapshots
            .iter()
            .map(|s| s.run.total_epochs.to_string().len())
            .max()
            .unwrap_or(1);
        Layout { hidden_width, epoch_width }
    }
}

/// Orders snapshots best-first by current error. Ties keep grid order and NaN
/// errors go to the bottom.
pub fn ranked(snapshots: &[ProgressSnapshot]) -> Vec<&ProgressSnapshot> {
    let mut sorted: Vec<&ProgressSnapshot> = snapshots.iter().collect();
    sorted.sort_by(|a, b| compare_errors(a.current_error, b.current_error));
    sorted
}

/// One dashboard line for the run at 1-based `rank`.
pub fn format_line(rank: usize, snap: &ProgressSnapshot, layout: Layout) -> String {
    let id = snap.run.padded_id(layout.hidden_width);
    let ew = layout.epoch_width;
    match snap.status {
        RunStatus::Queued => format!("  [{rank:<2}] {id} [QUEUED]    | Waiting to start..."),
        RunStatus::Running => {
            let percent = if snap.run.total_epochs == 0 {
                100
            } else {
                snap.current_epoch * 100 / snap.run.total_epochs
            };
            format!(
                "  [{rank:<2}] {id} [RUNNING]   | Epoch: {:<ew$} ({percent:>3}%) \
                 | Error: {:.12} | Improvement: {:+.12}",
                snap.current_epoch,
                snap.current_error,
                snap.improvement(),
            )
        }
        RunStatus::Converged | RunStatus::Completed => format!(
            "  [{rank:<2}] {id} [{:<9}] | Finished in {:<ew$} epochs | Final Error: {:.12}",
            snap.status, snap.current_epoch, snap.current_error,
        ),
    }
}

/// The full dashboard text, one line per run, best first.
pub fn render_lines(snapshots: &[ProgressSnapshot]) -> Vec<String> {
    let layout = Layout::for_runs(snapshots);
    ranked(snapshots)
        .into_iter()
        .enumerate()
        .map(|(i, snap)| format_line(i + 1, snap, layout))
        .collect()
}
