//! Per-episode grasp counter and progress statistics.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of consecutive steps the source has been grasped.
///
/// # Example
///
/// ```
/// use sim_eval::GraspCounter;
///
/// let mut counter = GraspCounter::default();
/// for _ in 0..5 {
///     counter.observe(true);
/// }
/// assert!(counter.reached(5));
///
/// counter.observe(false);
/// assert_eq!(counter.count(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraspCounter(u32);

impl GraspCounter {
    /// Record one step's grasp verdict and return the updated count.
    pub fn observe(&mut self, grasped: bool) -> u32 {
        self.0 = if grasped { self.0.saturating_add(1) } else { 0 };
        self.0
    }

    /// Current run length.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0
    }

    /// Whether the run length has reached `steps`.
    #[must_use]
    pub const fn reached(self, steps: u32) -> bool {
        self.0 >= steps
    }

    /// Clear the counter.
    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Progress statistics for one episode.
///
/// `moved_correct_obj`, `moved_wrong_obj` and `src_on_target` hold the value
/// from the latest step. The remaining flags are latched: once set they stay
/// set until the episode is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpisodeStats {
    /// The source moved, and moved more than the target and every distractor (latest step).
    pub moved_correct_obj: bool,
    /// The target or a distractor moved, and moved more than the source (latest step).
    pub moved_wrong_obj: bool,
    /// The source has been grasped at some step.
    pub is_src_obj_grasped: bool,
    /// A stable grasp has been held at some step.
    pub consecutive_grasp: bool,
    /// Placement relative to the target (latest step, goal-aligned).
    pub src_on_target: bool,
    /// The gripper has touched or come close to the source at some step.
    pub source_intention: bool,
}

/// Instantaneous flags folded into [`EpisodeStats`] after each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepFlags {
    /// See [`EpisodeStats::moved_correct_obj`].
    pub moved_correct_obj: bool,
    /// See [`EpisodeStats::moved_wrong_obj`].
    pub moved_wrong_obj: bool,
    /// Grasp verdict this step.
    pub is_src_obj_grasped: bool,
    /// Stable grasp this step.
    pub consecutive_grasp: bool,
    /// Placement flag to record.
    pub src_on_target: bool,
    /// Engagement with the source this step.
    pub source_intention: bool,
}

impl EpisodeStats {
    /// Fold one step into the statistics.
    pub fn record(&mut self, step: &StepFlags) {
        self.moved_correct_obj = step.moved_correct_obj;
        self.moved_wrong_obj = step.moved_wrong_obj;
        self.src_on_target = step.src_on_target;
        self.is_src_obj_grasped |= step.is_src_obj_grasped;
        self.consecutive_grasp |= step.consecutive_grasp;
        self.source_intention |= step.source_intention;
    }

    /// Whether every latched flag of `self` is also set in `later`.
    #[must_use]
    pub const fn latched_within(&self, later: &Self) -> bool {
        (!self.is_src_obj_grasped || later.is_src_obj_grasped)
            && (!self.consecutive_grasp || later.consecutive_grasp)
            && (!self.source_intention || later.source_intention)
    }
}
