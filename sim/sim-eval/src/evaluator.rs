//! Outcome evaluator.
//!
//! Turns one [`WorldSnapshot`] into task-progress predicates and a success
//! verdict, updating the episode's [`EpisodeTracker`] in place.
//!
//! # Algorithm
//!
//! Per call:
//!
//! 1. Source intention: finger contact, or end effector within
//!    `intention_distance` of the source.
//! 2. Planar displacements from the after-settle reference decide
//!    `moved_correct_obj` / `moved_wrong_obj`.
//! 3. The grasp verdict advances or clears the grasp counter.
//! 4. Geometric placement, optionally refined by contact exclusivity.
//! 5. The success policy combines the predicates.
//! 6. Episode statistics are updated.

use sim_types::{SceneReference, WorldSnapshot};
use tracing::{trace, warn};

use crate::predicates::{rests_on_other_body, source_intention, Displacements, Placement};
use crate::stats::StepFlags;
use crate::{EpisodeStats, EpisodeTracker, EvaluationConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything one evaluation call reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluationResult {
    /// The source moved, and moved more than the target and every distractor.
    pub moved_correct_obj: bool,
    /// The target or a distractor moved, and moved more than the source.
    pub moved_wrong_obj: bool,
    /// Grasp-detector verdict this step.
    pub is_src_obj_grasped: bool,
    /// The grasp has been held for the required number of consecutive steps.
    pub consecutive_grasp: bool,
    /// Geometric (and, if enabled, contact-refined) placement on the target.
    pub src_on_target: bool,
    /// The agent engaged the source this step.
    pub source_intention: bool,
    /// Statistics after this step.
    pub episode_stats: EpisodeStats,
    /// Success verdict under the configured policy.
    pub success: bool,
}

/// Stateless evaluator; all episode state lives in the tracker.
///
/// # Example
///
/// ```
/// use sim_eval::{EpisodeTracker, EvaluationConfig, OutcomeEvaluator};
/// use sim_types::{BodyId, Pose, SceneReference, WorldSnapshot};
/// use nalgebra::{Point3, Vector2, Vector3};
///
/// let evaluator = OutcomeEvaluator::new(EvaluationConfig::default())?;
/// let reference = SceneReference::new(
///     BodyId::new(1),
///     BodyId::new(2),
///     Point3::new(-0.2, 0.0, 0.9),
///     Vector2::zeros(),
///     Vector3::new(0.02, 0.02, 0.01),
///     Vector3::new(0.05, 0.05, 0.02),
/// );
/// let mut tracker = EpisodeTracker::new();
///
/// // Source resting on top of the target.
/// let snapshot = WorldSnapshot::new(
///     Pose::from_position(Point3::new(0.0, 0.0, 0.95)),
///     Pose::from_position(Point3::new(0.0, 0.0, 0.9)),
///     Point3::new(0.0, 0.0, 1.2),
/// );
///
/// let result = evaluator.evaluate(&reference, &snapshot, &mut tracker)?;
/// assert!(result.src_on_target);
/// assert!(result.success);
/// # Ok::<(), sim_types::SimError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeEvaluator {
    config: EvaluationConfig,
}

impl OutcomeEvaluator {
    /// Create an evaluator, validating the configuration.
    pub fn new(config: EvaluationConfig) -> sim_types::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The evaluator configuration.
    #[must_use]
    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Evaluate one step.
    ///
    /// A malformed reference or snapshot is rejected before anything is
    /// computed, leaving `tracker` untouched.
    pub fn evaluate(
        &self,
        reference: &SceneReference,
        snapshot: &WorldSnapshot,
        tracker: &mut EpisodeTracker,
    ) -> sim_types::Result<EvaluationResult> {
        if let Err(err) = reference.validate().and_then(|()| snapshot.validate(reference)) {
            warn!(error = %err, "Rejecting evaluation input");
            return Err(err);
        }

        let thresholds = &self.config.thresholds;
        let policy = self.config.policy;

        let intention = source_intention(snapshot, thresholds.intention_distance);

        let displacements = Displacements::measure(reference, snapshot);
        let moved_correct_obj = displacements.moved_correct(thresholds.displacement);
        let moved_wrong_obj = displacements.moved_wrong(thresholds.displacement);

        let grasped = snapshot.source_grasped;
        let consecutive_grasp =
            tracker.observe_grasp(grasped, thresholds.consecutive_grasp_steps);

        let placement = Placement::compute(
            reference,
            snapshot,
            self.config.xy_tolerance(),
            self.config.vertical_offset_tolerance,
        );
        let mut src_on_target = placement.is_on_target();
        if src_on_target
            && self.config.checks_contact_exclusivity()
            && rests_on_other_body(reference, snapshot, thresholds.contact_impulse)
        {
            src_on_target = false;
        }

        let success = policy.is_success(src_on_target, moved_correct_obj, consecutive_grasp);

        let episode_stats = tracker.record(&StepFlags {
            moved_correct_obj,
            moved_wrong_obj,
            is_src_obj_grasped: grasped,
            consecutive_grasp,
            src_on_target: policy.recorded_placement(src_on_target),
            source_intention: intention,
        });

        trace!(
            source_displacement = displacements.source,
            moved_correct_obj,
            moved_wrong_obj,
            grasped,
            grasp_count = tracker.grasp_counter().count(),
            xy_flag = placement.xy,
            z_flag = placement.z,
            src_on_target,
            success,
            "Evaluated step"
        );

        Ok(EvaluationResult {
            moved_correct_obj,
            moved_wrong_obj,
            is_src_obj_grasped: grasped,
            consecutive_grasp,
            src_on_target,
            source_intention: intention,
            episode_stats,
            success,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::SuccessPolicy;
    use nalgebra::{Point3, Vector2, Vector3};
    use sim_types::{BodyId, Contact, ContactPoint, Pose};

    const SOURCE: BodyId = BodyId(1);
    const TARGET: BodyId = BodyId(2);
    const DISTRACTOR: BodyId = BodyId(3);
    const GRIPPER: BodyId = BodyId(50);

    fn reference() -> SceneReference {
        SceneReference::new(
            SOURCE,
            TARGET,
            Point3::new(0.0, 0.0, 0.0),
            Vector2::new(0.1, 0.0),
            Vector3::new(0.0, 0.0, 0.01),
            Vector3::new(0.05, 0.05, 0.02),
        )
        .with_robot_links([GRIPPER])
        .with_distractor(DISTRACTOR, Vector2::new(0.2, 0.2))
    }

    /// Source sitting on the target, displaced 0.1 from where it settled.
    fn placed() -> WorldSnapshot {
        WorldSnapshot::new(
            Pose::from_position(Point3::new(0.1, 0.0, 0.05)),
            Pose::from_position(Point3::new(0.1, 0.0, 0.0)),
            Point3::new(0.1, 0.0, 0.3),
        )
        .with_distractor_positions(vec![Vector2::new(0.2, 0.2)])
    }

    fn on_third_body(impulse: f64) -> Contact {
        Contact::between_bodies(
            SOURCE,
            DISTRACTOR,
            vec![ContactPoint::with_impulse(Vector3::new(0.0, 0.0, impulse))],
        )
    }

    #[test]
    fn test_placed_source_succeeds() {
        let evaluator = OutcomeEvaluator::new(EvaluationConfig::default()).unwrap();
        let mut tracker = EpisodeTracker::new();

        let result = evaluator.evaluate(&reference(), &placed(), &mut tracker).unwrap();
        assert!(result.src_on_target);
        assert!(result.success);
        assert!(result.moved_correct_obj);
        assert!(!result.moved_wrong_obj);
        assert!(result.episode_stats.src_on_target);
    }

    #[test]
    fn test_third_body_contact_blocks_placement() {
        let evaluator = OutcomeEvaluator::new(EvaluationConfig::default()).unwrap();
        let mut tracker = EpisodeTracker::new();
        let snapshot = placed().with_contacts(vec![on_third_body(1e-5)]);

        let result = evaluator.evaluate(&reference(), &snapshot, &mut tracker).unwrap();
        assert!(!result.src_on_target);
        assert!(!result.success);
    }

    #[test]
    fn test_third_body_contact_ignored_for_partial_placement() {
        let config = EvaluationConfig::default().with_complete_placement(false);
        let evaluator = OutcomeEvaluator::new(config).unwrap();
        let mut tracker = EpisodeTracker::new();
        let snapshot = placed().with_contacts(vec![on_third_body(1e-5)]);

        let result = evaluator.evaluate(&reference(), &snapshot, &mut tracker).unwrap();
        assert!(result.src_on_target);
        assert!(result.success);
    }

    #[test]
    fn test_place_away_rejects_source_on_target() {
        let evaluator = OutcomeEvaluator::new(EvaluationConfig::place_away()).unwrap();
        let mut tracker = EpisodeTracker::new();
        let snapshot = placed().with_gripper(true, true);

        let mut last = None;
        for _ in 0..5 {
            last = Some(evaluator.evaluate(&reference(), &snapshot, &mut tracker).unwrap());
        }
        let result = last.unwrap();

        assert!(result.src_on_target);
        assert!(result.moved_correct_obj);
        assert!(result.consecutive_grasp);
        assert!(!result.success);
        // Statistics track the goal-aligned flag.
        assert!(!result.episode_stats.src_on_target);
    }

    #[test]
    fn test_place_away_succeeds_off_target() {
        let evaluator = OutcomeEvaluator::new(EvaluationConfig::place_away()).unwrap();
        let mut tracker = EpisodeTracker::new();
        let mut snapshot = placed().with_gripper(true, true);
        snapshot.source_pose = Pose::from_position(Point3::new(-0.1, 0.0, 0.05));

        let results: Vec<_> = (0..5)
            .map(|_| evaluator.evaluate(&reference(), &snapshot, &mut tracker).unwrap())
            .collect();

        assert!(results[..4].iter().all(|r| !r.success));
        assert!(results[4].success);
        assert!(results[4].episode_stats.src_on_target);
    }

    #[test]
    fn test_target_pushed_further_than_source() {
        let reference = SceneReference::new(
            SOURCE,
            TARGET,
            Point3::new(0.0, 0.0, 0.0),
            Vector2::new(0.2, 0.0),
            Vector3::new(0.0, 0.0, 0.01),
            Vector3::new(0.05, 0.05, 0.02),
        );
        // Carrot carried 4 cm, plate knocked 10 cm.
        let snapshot = WorldSnapshot::new(
            Pose::from_position(Point3::new(0.0, 0.04, 0.1)),
            Pose::from_position(Point3::new(0.3, 0.0, 0.0)),
            Point3::new(0.0, 0.04, 0.15),
        )
        .with_gripper(true, true);

        let evaluator = OutcomeEvaluator::new(EvaluationConfig::place_away()).unwrap();
        let mut tracker = EpisodeTracker::new();
        let results: Vec<_> = (0..5)
            .map(|_| evaluator.evaluate(&reference, &snapshot, &mut tracker).unwrap())
            .collect();

        let last = results[4];
        assert!(last.consecutive_grasp);
        assert!(!last.src_on_target);
        assert!(!last.moved_correct_obj);
        assert!(last.moved_wrong_obj);
        assert!(results.iter().all(|r| !r.success));

        // Same carry with the plate left where it settled.
        let mut still = snapshot;
        still.target_pose = Pose::from_position(Point3::new(0.2, 0.0, 0.0));
        let mut tracker = EpisodeTracker::new();
        let results: Vec<_> = (0..5)
            .map(|_| evaluator.evaluate(&reference, &still, &mut tracker).unwrap())
            .collect();
        assert!(results[4].moved_correct_obj);
        assert!(!results[4].moved_wrong_obj);
        assert!(results[4].success);
    }

    #[test]
    fn test_place_away_ignores_contacts() {
        let evaluator = OutcomeEvaluator::new(EvaluationConfig::place_away()).unwrap();
        let mut tracker = EpisodeTracker::new();
        let snapshot = placed().with_contacts(vec![on_third_body(1.0)]);

        let result = evaluator.evaluate(&reference(), &snapshot, &mut tracker).unwrap();
        assert!(result.src_on_target);
        assert_eq!(evaluator.config().policy, SuccessPolicy::PlaceAwayFromTarget);
    }

    #[test]
    fn test_intention_latches() {
        let evaluator = OutcomeEvaluator::new(EvaluationConfig::default()).unwrap();
        let mut tracker = EpisodeTracker::new();

        let near = placed().with_gripper(true, false);
        let r1 = evaluator.evaluate(&reference(), &near, &mut tracker).unwrap();
        assert!(r1.source_intention);

        let far = placed();
        let r2 = evaluator.evaluate(&reference(), &far, &mut tracker).unwrap();
        assert!(!r2.source_intention);
        assert!(r2.episode_stats.source_intention);
    }

    #[test]
    fn test_rejects_malformed_snapshot() {
        let evaluator = OutcomeEvaluator::new(EvaluationConfig::default()).unwrap();
        let mut tracker = EpisodeTracker::new();
        let snapshot = placed().with_distractor_positions(vec![]).with_gripper(false, true);

        let err = evaluator
            .evaluate(&reference(), &snapshot, &mut tracker)
            .unwrap_err();
        assert!(err.is_invalid_snapshot());
        assert_eq!(tracker, EpisodeTracker::new());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EvaluationConfig::default().with_vertical_offset_tolerance(-1.0);
        assert!(OutcomeEvaluator::new(config).is_err());
    }
}
