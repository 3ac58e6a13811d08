//! Progress display for the solve and repair phases

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PHASE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>8} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Generation phase a bar tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Minimum-entropy collapse of every cell
    Solve,
    /// Connectivity repair walk
    Repair,
}

impl Phase {
    const fn label(self) -> &'static str {
        match self {
            Self::Solve => "solve",
            Self::Repair => "repair",
        }
    }
}

/// One bar per phase, both measured in grid cells
///
/// The solve bar counts resolved cells, the repair bar counts cells the walk
/// has retired.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    solve_bar: ProgressBar,
    repair_bar: ProgressBar,
}

impl ProgressManager {
    /// Create bars for a grid of `cell_count` cells
    pub fn new(cell_count: usize) -> Self {
        let multi_progress = MultiProgress::new();
        let solve_bar = multi_progress.add(Self::phase_bar(Phase::Solve, cell_count));
        let repair_bar = multi_progress.add(Self::phase_bar(Phase::Repair, cell_count));
        Self {
            multi_progress,
            solve_bar,
            repair_bar,
        }
    }

    fn phase_bar(phase: Phase, cell_count: usize) -> ProgressBar {
        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(PHASE_STYLE.clone());
        bar.set_prefix(phase.label());
        bar
    }

    const fn bar(&self, phase: Phase) -> &ProgressBar {
        match phase {
            Phase::Solve => &self.solve_bar,
            Phase::Repair => &self.repair_bar,
        }
    }

    /// Report how many cells the phase has completed
    pub fn update(&self, phase: Phase, completed: usize) {
        self.bar(phase).set_position(completed as u64);
    }

    /// Attach a short status message to the phase's bar
    pub fn set_message(&self, phase: Phase, message: String) {
        self.bar(phase).set_message(message);
    }

    /// Fill the phase's bar and mark it done
    pub fn complete(&self, phase: Phase) {
        let bar = self.bar(phase);
        if let Some(length) = bar.length() {
            bar.set_position(length);
        }
        bar.finish_with_message("✓");
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}
