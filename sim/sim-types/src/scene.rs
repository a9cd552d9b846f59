//! Scene reference and per-step world snapshots.
//!
//! A [`SceneReference`] is captured once per episode, after the objects have
//! settled on the table. A [`WorldSnapshot`] is produced by the simulation on
//! every step and judged against that reference.

use hashbrown::HashSet;
use nalgebra::{Point3, Vector2, Vector3};

use crate::{BodyId, Contact, Pose, SimError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// After-settle reference of a distractor object.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistractorReference {
    /// Body of the distractor.
    pub body: BodyId,
    /// Planar position once physics has settled.
    pub position: Vector2<f64>,
}

impl DistractorReference {
    /// Create a distractor reference.
    #[must_use]
    pub const fn new(body: BodyId, position: Vector2<f64>) -> Self {
        Self { body, position }
    }
}

/// Per-episode reference data, fixed from reset until the next reset.
///
/// The half-extents are half of each object's world-frame bounding-box
/// diagonal at the first step and are never recomputed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneReference {
    /// Object the agent should move.
    pub source: BodyId,
    /// Object the source should end up on or in.
    pub target: BodyId,
    /// Every link of the robot; contacts with these never disqualify placement.
    pub robot_links: HashSet<BodyId>,
    /// Source position once physics has settled.
    pub source_position: Point3<f64>,
    /// Planar target position once physics has settled.
    pub target_position: Vector2<f64>,
    /// Half of the source bounding-box extents.
    pub source_half_extents: Vector3<f64>,
    /// Half of the target bounding-box extents.
    pub target_half_extents: Vector3<f64>,
    /// Other tracked objects, in the order their positions appear in snapshots.
    pub distractors: Vec<DistractorReference>,
}

impl SceneReference {
    /// Create a reference with no robot links and no distractors.
    #[must_use]
    pub fn new(
        source: BodyId,
        target: BodyId,
        source_position: Point3<f64>,
        target_position: Vector2<f64>,
        source_half_extents: Vector3<f64>,
        target_half_extents: Vector3<f64>,
    ) -> Self {
        Self {
            source,
            target,
            robot_links: HashSet::new(),
            source_position,
            target_position,
            source_half_extents,
            target_half_extents,
            distractors: Vec::new(),
        }
    }

    /// Set the robot link bodies.
    #[must_use]
    pub fn with_robot_links(mut self, links: impl IntoIterator<Item = BodyId>) -> Self {
        self.robot_links = links.into_iter().collect();
        self
    }

    /// Add a distractor object.
    #[must_use]
    pub fn with_distractor(mut self, body: BodyId, position: Vector2<f64>) -> Self {
        self.distractors.push(DistractorReference::new(body, position));
        self
    }

    /// Whether a body belongs to the robot.
    #[must_use]
    pub fn is_robot_link(&self, body: BodyId) -> bool {
        self.robot_links.contains(&body)
    }

    /// Validate the reference.
    pub fn validate(&self) -> crate::Result<()> {
        if self.source == self.target {
            return Err(SimError::invalid_snapshot(
                "source and target must be different bodies",
            ));
        }
        if !self.source_position.coords.iter().all(|x| x.is_finite()) {
            return Err(SimError::invalid_snapshot(
                "source after-settle position is not finite",
            ));
        }
        if !self.target_position.iter().all(|x| x.is_finite()) {
            return Err(SimError::invalid_snapshot(
                "target after-settle position is not finite",
            ));
        }
        if !finite_non_negative(&self.source_half_extents)
            || !finite_non_negative(&self.target_half_extents)
        {
            return Err(SimError::invalid_snapshot(
                "half-extents must be finite and non-negative",
            ));
        }
        if let Some(d) = self
            .distractors
            .iter()
            .find(|d| !d.position.iter().all(|x| x.is_finite()))
        {
            return Err(SimError::invalid_snapshot(format!(
                "after-settle position of {} is not finite",
                d.body
            )));
        }
        Ok(())
    }
}

fn finite_non_negative(v: &Vector3<f64>) -> bool {
    v.iter().all(|x| x.is_finite() && *x >= 0.0)
}

/// World state observed at one simulation step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldSnapshot {
    /// Current pose of the source object.
    pub source_pose: Pose,
    /// Current pose of the target object.
    pub target_pose: Pose,
    /// Current end-effector position.
    pub end_effector_position: Point3<f64>,
    /// Current planar positions of the distractors, in reference order.
    pub distractor_positions: Vec<Vector2<f64>>,
    /// Contacts reported for this step.
    pub contacts: Vec<Contact>,
    /// Whether the gripper fingers touch the source this step.
    pub gripper_touching_source: bool,
    /// Grasp-detector verdict for the source this step.
    pub source_grasped: bool,
}

impl WorldSnapshot {
    /// Create a snapshot with no distractors, no contacts, and no grasp.
    #[must_use]
    pub fn new(source_pose: Pose, target_pose: Pose, end_effector_position: Point3<f64>) -> Self {
        Self {
            source_pose,
            target_pose,
            end_effector_position,
            distractor_positions: Vec::new(),
            contacts: Vec::new(),
            gripper_touching_source: false,
            source_grasped: false,
        }
    }

    /// Set the distractor positions.
    #[must_use]
    pub fn with_distractor_positions(mut self, positions: Vec<Vector2<f64>>) -> Self {
        self.distractor_positions = positions;
        self
    }

    /// Set the contacts.
    #[must_use]
    pub fn with_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.contacts = contacts;
        self
    }

    /// Set the gripper signals.
    #[must_use]
    pub fn with_gripper(mut self, touching_source: bool, grasped: bool) -> Self {
        self.gripper_touching_source = touching_source;
        self.source_grasped = grasped;
        self
    }

    /// Validate the snapshot against the episode reference.
    pub fn validate(&self, reference: &SceneReference) -> crate::Result<()> {
        if !self.source_pose.is_finite() || !self.target_pose.is_finite() {
            return Err(SimError::invalid_snapshot("object pose is not finite"));
        }
        if !self.end_effector_position.coords.iter().all(|x| x.is_finite()) {
            return Err(SimError::invalid_snapshot(
                "end-effector position is not finite",
            ));
        }
        if self.distractor_positions.len() != reference.distractors.len() {
            return Err(SimError::invalid_snapshot(format!(
                "expected {} distractor positions, got {}",
                reference.distractors.len(),
                self.distractor_positions.len()
            )));
        }
        if !self
            .distractor_positions
            .iter()
            .all(|p| p.iter().all(|x| x.is_finite()))
        {
            return Err(SimError::invalid_snapshot(
                "distractor position is not finite",
            ));
        }
        Ok(())
    }
}
