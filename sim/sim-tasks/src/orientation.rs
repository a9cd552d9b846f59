//! Object orientation tables.
//!
//! Rotations use static XYZ Euler angles: roll about x, then pitch about y,
//! then yaw about z, all in the world frame.

use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};

/// Initial rotations for every object of one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrientationConfig {
    /// Rotations in object order: source, target, distractors.
    pub rotations: Vec<UnitQuaternion<f64>>,
}

impl OrientationConfig {
    /// Create an orientation row from rotations in object order.
    #[must_use]
    pub fn new(rotations: Vec<UnitQuaternion<f64>>) -> Self {
        Self { rotations }
    }

    /// Number of objects covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    /// Whether the row covers no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    /// Whether every quaternion component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.rotations
            .iter()
            .all(|q| q.coords.iter().all(|x| x.is_finite()))
    }
}

/// No rotation.
#[must_use]
pub fn identity() -> UnitQuaternion<f64> {
    UnitQuaternion::identity()
}

/// Rotation about the world z axis.
#[must_use]
pub fn yaw(angle: f64) -> UnitQuaternion<f64> {
    euler(0.0, 0.0, angle)
}

/// Rotation about the world x axis.
#[must_use]
pub fn roll(angle: f64) -> UnitQuaternion<f64> {
    euler(angle, 0.0, 0.0)
}

/// Static XYZ Euler rotation.
#[must_use]
pub fn euler(roll: f64, pitch: f64, yaw: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_euler_angles(roll, pitch, yaw)
}
