//! Episode statistics tracker.

use tracing::debug;

use crate::stats::StepFlags;
use crate::{EpisodeStats, GraspCounter};

/// Owns the grasp counter and statistics of one episode.
///
/// Created at reset, updated by the evaluator once per step and read by the
/// benchmark harness after every step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeTracker {
    grasp: GraspCounter,
    stats: EpisodeStats,
}

impl EpisodeTracker {
    /// Create a tracker in its reset state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the counter and every statistic.
    pub fn reset(&mut self) {
        debug!(
            grasp_count = self.grasp.count(),
            "Resetting episode statistics"
        );
        self.grasp.reset();
        self.stats = EpisodeStats::default();
    }

    /// Read-only copy of the current statistics.
    #[must_use]
    pub fn current_stats(&self) -> EpisodeStats {
        self.stats
    }

    /// Current grasp counter.
    #[must_use]
    pub fn grasp_counter(&self) -> GraspCounter {
        self.grasp
    }

    /// Advance the grasp counter and report whether a stable grasp is held.
    pub(crate) fn observe_grasp(&mut self, grasped: bool, required_steps: u32) -> bool {
        self.grasp.observe(grasped);
        self.grasp.reached(required_steps)
    }

    pub(crate) fn record(&mut self, step: &StepFlags) -> EpisodeStats {
        self.stats.record(step);
        self.stats
    }
}
