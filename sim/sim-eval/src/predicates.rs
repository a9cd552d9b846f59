//! Instantaneous task-progress predicates.
//!
//! Each function reads one snapshot (and the episode reference) and carries
//! no state of its own.

use sim_types::{planar_distance, ContactPartner, SceneReference, WorldSnapshot};

/// Whether the agent is engaging the source: finger contact, or the end
/// effector strictly within `intention_distance` of the source origin.
#[must_use]
pub fn source_intention(snapshot: &WorldSnapshot, intention_distance: f64) -> bool {
    snapshot.gripper_touching_source
        || (snapshot.end_effector_position - snapshot.source_pose.position).norm()
            < intention_distance
}

/// Planar displacements of the tracked objects from their after-settle positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Displacements {
    /// Source displacement.
    pub source: f64,
    /// Target displacement.
    pub target: f64,
    /// Distractor displacements, in reference order.
    pub distractors: Vec<f64>,
}

impl Displacements {
    /// Measure displacements for one step.
    #[must_use]
    pub fn measure(reference: &SceneReference, snapshot: &WorldSnapshot) -> Self {
        let source = planar_distance(
            &reference.source_position.coords.xy(),
            &snapshot.source_pose.xy(),
        );
        let target = planar_distance(&reference.target_position, &snapshot.target_pose.xy());
        let distractors = reference
            .distractors
            .iter()
            .zip(&snapshot.distractor_positions)
            .map(|(r, current)| planar_distance(&r.position, current))
            .collect();
        Self {
            source,
            target,
            distractors,
        }
    }

    /// Displacements of every object other than the source: target first,
    /// then distractors.
    pub fn others(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::once(self.target).chain(self.distractors.iter().copied())
    }

    /// The source moved more than `threshold`, and strictly more than every
    /// other object.
    #[must_use]
    pub fn moved_correct(&self, threshold: f64) -> bool {
        self.source > threshold && self.others().all(|d| d < self.source)
    }

    /// Some other object moved more than `threshold`, and some other object
    /// moved more than the source.
    ///
    /// This is not the complement of [`Self::moved_correct`]: both are false
    /// when nothing moved far enough.
    #[must_use]
    pub fn moved_wrong(&self, threshold: f64) -> bool {
        self.others().any(|d| d > threshold) && self.others().any(|d| d > self.source)
    }
}

/// Geometric placement of the source relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Source centre lies within the target's planar footprint (plus slack).
    pub xy: bool,
    /// Source is above the target and its bottom is close to the target top.
    pub z: bool,
}

impl Placement {
    /// Compute the placement flags.
    ///
    /// ```
    /// use sim_eval::Placement;
    /// use sim_types::{BodyId, Pose, SceneReference, WorldSnapshot};
    /// use nalgebra::{Point3, Vector2, Vector3};
    ///
    /// let reference = SceneReference::new(
    ///     BodyId::new(1),
    ///     BodyId::new(2),
    ///     Point3::origin(),
    ///     Vector2::zeros(),
    ///     Vector3::new(0.0, 0.0, 0.01),
    ///     Vector3::new(0.05, 0.05, 0.02),
    /// );
    /// let snapshot = WorldSnapshot::new(
    ///     Pose::from_position(Point3::new(0.0, 0.0, 0.05)),
    ///     Pose::identity(),
    ///     Point3::new(1.0, 1.0, 1.0),
    /// );
    ///
    /// let placement = Placement::compute(&reference, &snapshot, 0.003, 0.02);
    /// assert!(placement.is_on_target());
    /// ```
    #[must_use]
    pub fn compute(
        reference: &SceneReference,
        snapshot: &WorldSnapshot,
        xy_tolerance: f64,
        vertical_offset_tolerance: f64,
    ) -> Self {
        let offset = snapshot.source_pose.offset_from(&snapshot.target_pose);
        let target = reference.target_half_extents;
        let source = reference.source_half_extents;

        let xy = offset.xy().norm() <= target.xy().norm() + xy_tolerance;
        // Source bottom at most `vertical_offset_tolerance` above the target top.
        let max_height = target.z + source.z + vertical_offset_tolerance;
        let z = offset.z > 0.0 && offset.z <= max_height;
        Self { xy, z }
    }

    /// Both flags hold.
    #[must_use]
    pub const fn is_on_target(self) -> bool {
        self.xy && self.z
    }
}

/// Whether the source is pressed against a body other than the target or
/// the robot, with impulse magnitude strictly above `impulse_threshold`.
///
/// The static environment counts as such a body.
#[must_use]
pub fn rests_on_other_body(
    reference: &SceneReference,
    snapshot: &WorldSnapshot,
    impulse_threshold: f64,
) -> bool {
    snapshot.contacts.iter().any(|contact| {
        let Some(partner) = contact.partner_of(reference.source) else {
            return false;
        };
        let ignored = match partner {
            ContactPartner::Body(body) => {
                body == reference.target || reference.is_robot_link(body)
            }
            ContactPartner::Environment => false,
        };
        !ignored && contact.impulse_magnitude() > impulse_threshold
    })
}
