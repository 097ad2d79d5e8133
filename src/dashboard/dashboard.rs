use std::path::PathBuf;

use log::warn;
use parking_lot::Mutex;

use crate::dashboard::format::render_lines;
use crate::dashboard::render::Renderer;
use crate::experiment::progress::ProgressSnapshot;
use crate::experiment::run::RunDescriptor;

struct DashboardState {
    snapshots: Vec<ProgressSnapshot>,
    renderer: Box<dyn Renderer>,
    status_file: Option<PathBuf>,
}

/// Live, rank-ordered view of every run in an experiment.
///
/// One lock guards the snapshots, the renderer and the status file: an update
/// and the redraw it triggers happen atomically with respect to other runs.
pub struct Dashboard {
    state: Mutex<DashboardState>,
}

impl Dashboard {
    /// One queued snapshot per run, in grid order.
    pub fn new(
        runs: &[RunDescriptor],
        renderer: Box<dyn Renderer>,
        status_file: Option<PathBuf>,
    ) -> Self {
        let snapshots = runs.iter().cloned().map(ProgressSnapshot::new).collect();
        Dashboard {
            state: Mutex::new(DashboardState { snapshots, renderer, status_file }),
        }
    }

    /// Applies `f` to the snapshot at `index`, then redraws.
    ///
    /// Each run only ever passes its own index.
    pub fn update<F>(&self, index: usize, f: F)
    where
        F: FnOnce(&mut ProgressSnapshot),
    {
        let mut state = self.state.lock();
        match state.snapshots.get_mut(index) {
            Some(snap) => f(snap),
            None => {
                warn!("progress for unknown run {index}");
                return;
            }
        }
        state.redraw();
    }

    pub fn redraw(&self) {
        self.state.lock().redraw();
    }

    pub fn snapshot(&self, index: usize) -> Option<ProgressSnapshot> {
        self.state.lock().snapshots.get(index).cloned()
    }

    pub fn snapshots(&self) -> Vec<ProgressSnapshot> {
        self.state.lock().snapshots.clone()
    }

    /// The current frame without drawing it.
    pub fn lines(&self) -> Vec<String> {
        render_lines(&self.state.lock().snapshots)
    }
}

impl DashboardState {
    fn redraw(&mut self) {
        let lines = render_lines(&self.snapshots);

        if let Err(e) = self.renderer.render(&lines) {
            warn!("dashboard render failed: {e}");
        }

        if let Some(path) = &self.status_file {
            let mut text = lines.join("\n");
            text.push('\n');
            if let Err(e) = std::fs::write(path, text) {
                warn!("error writing status file {}: {e}", path.display());
            }
        }
    }
}
