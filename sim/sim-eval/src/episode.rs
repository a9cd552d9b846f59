//! Episode driver bundling the evaluator, the after-settle reference and the tracker.

use sim_types::{SceneReference, WorldSnapshot};
use tracing::{debug, info};

use crate::{EpisodeStats, EpisodeTracker, EvaluationResult, OutcomeEvaluator};

/// One episode of a task, from reset to termination.
///
/// # Example
///
/// ```
/// use sim_eval::{Episode, EvaluationConfig, OutcomeEvaluator};
/// use sim_types::{BodyId, Pose, SceneReference, WorldSnapshot};
/// use nalgebra::{Point3, Vector2, Vector3};
///
/// let reference = SceneReference::new(
///     BodyId::new(1),
///     BodyId::new(2),
///     Point3::new(0.0, 0.0, 0.9),
///     Vector2::new(0.2, 0.0),
///     Vector3::new(0.02, 0.02, 0.01),
///     Vector3::new(0.05, 0.05, 0.02),
/// );
/// let evaluator = OutcomeEvaluator::new(EvaluationConfig::default())?;
/// let mut episode = Episode::new(evaluator, reference)?;
///
/// // Nothing has moved yet.
/// let idle = WorldSnapshot::new(
///     Pose::from_position(Point3::new(0.0, 0.0, 0.9)),
///     Pose::from_position(Point3::new(0.2, 0.0, 0.9)),
///     Point3::new(0.0, 0.0, 1.2),
/// );
/// let result = episode.step(&idle)?;
/// assert!(!result.success);
/// assert_eq!(episode.steps(), 1);
/// assert_eq!(episode.first_success_step(), None);
/// # Ok::<(), sim_types::SimError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Episode {
    evaluator: OutcomeEvaluator,
    reference: SceneReference,
    tracker: EpisodeTracker,
    steps: u32,
    first_success_step: Option<u32>,
}

impl Episode {
    /// Start an episode from a captured after-settle reference.
    pub fn new(evaluator: OutcomeEvaluator, reference: SceneReference) -> sim_types::Result<Self> {
        reference.validate()?;
        Ok(Self {
            evaluator,
            reference,
            tracker: EpisodeTracker::new(),
            steps: 0,
            first_success_step: None,
        })
    }

    /// Begin a new episode with a freshly captured reference.
    ///
    /// On error the previous episode is left as it was.
    pub fn reset(&mut self, reference: SceneReference) -> sim_types::Result<()> {
        reference.validate()?;
        debug!(
            previous_steps = self.steps,
            distractors = reference.distractors.len(),
            "Resetting episode"
        );
        self.reference = reference;
        self.tracker.reset();
        self.steps = 0;
        self.first_success_step = None;
        Ok(())
    }

    /// Evaluate one simulation step.
    ///
    /// Rejected snapshots do not count as steps.
    pub fn step(&mut self, snapshot: &WorldSnapshot) -> sim_types::Result<EvaluationResult> {
        let result = self
            .evaluator
            .evaluate(&self.reference, snapshot, &mut self.tracker)?;
        self.steps = self.steps.saturating_add(1);

        if result.success && self.first_success_step.is_none() {
            self.first_success_step = Some(self.steps);
            info!(
                step = self.steps,
                policy = %self.evaluator.config().policy,
                "Episode succeeded"
            );
        }

        Ok(result)
    }

    /// Statistics after the latest step.
    #[must_use]
    pub fn stats(&self) -> EpisodeStats {
        self.tracker.current_stats()
    }

    /// Number of evaluated steps since the last reset.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// 1-based step at which success was first reported.
    #[must_use]
    pub fn first_success_step(&self) -> Option<u32> {
        self.first_success_step
    }

    /// The after-settle reference of this episode.
    #[must_use]
    pub fn reference(&self) -> &SceneReference {
        &self.reference
    }

    /// The evaluator driving this episode.
    #[must_use]
    pub fn evaluator(&self) -> &OutcomeEvaluator {
        &self.evaluator
    }
}
