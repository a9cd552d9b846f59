//! Rigid body identity and pose types.
//!
//! Poses are supplied by the external physics engine once per step. Only
//! position and orientation are needed to judge an episode, so velocities are
//! not modelled here.

use nalgebra::{Point3, UnitQuaternion, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a physical body (object actor or robot link).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyId(pub u64);

impl BodyId {
    /// Create a new body ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for BodyId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// Position and orientation of a rigid body.
///
/// # Example
///
/// ```
/// use sim_types::Pose;
/// use nalgebra::Point3;
///
/// let pose = Pose::from_position(Point3::new(0.3, 0.4, 0.9));
/// assert!((pose.xy().norm() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    /// Position in world coordinates.
    pub position: Point3<f64>,
    /// Orientation as a unit quaternion.
    pub rotation: UnitQuaternion<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Create an identity pose (origin, no rotation).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Create a pose from position only (identity rotation).
    #[must_use]
    pub fn from_position(position: Point3<f64>) -> Self {
        Self {
            position,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Create a pose from position and rotation.
    #[must_use]
    pub const fn from_position_rotation(
        position: Point3<f64>,
        rotation: UnitQuaternion<f64>,
    ) -> Self {
        Self { position, rotation }
    }

    /// Planar (xy) part of the position.
    #[must_use]
    pub fn xy(&self) -> Vector2<f64> {
        self.position.coords.xy()
    }

    /// Offset from `other` to `self` in world coordinates.
    #[must_use]
    pub fn offset_from(&self, other: &Self) -> Vector3<f64> {
        self.position - other.position
    }

    /// Check if the pose contains `NaN` or `Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|x| x.is_finite())
            && self.rotation.coords.iter().all(|x| x.is_finite())
    }
}

/// Planar (xy) distance between two positions, ignoring height.
#[must_use]
pub fn planar_distance(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    (a - b).norm()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_body_id() {
        let id = BodyId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(BodyId::from(7), id);
        assert_eq!(id.to_string(), "Body(7)");
    }

    #[test]
    fn test_pose_xy_and_offset() {
        let a = Pose::from_position(Point3::new(1.0, 2.0, 3.0));
        let b = Pose::from_position(Point3::new(0.5, 1.0, 1.0));

        assert_eq!(a.xy(), Vector2::new(1.0, 2.0));
        assert_eq!(a.offset_from(&b), Vector3::new(0.5, 1.0, 2.0));
    }

    #[test]
    fn test_planar_distance_ignores_height() {
        let d = planar_distance(&Vector2::new(0.0, 0.0), &Vector2::new(0.03, 0.04));
        assert_relative_eq!(d, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_pose_finite() {
        assert!(Pose::identity().is_finite());
        let bad = Pose::from_position(Point3::new(f64::NAN, 0.0, 0.0));
        assert!(!bad.is_finite());
    }
}
