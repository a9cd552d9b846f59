//! Contact records reported by the physics engine for one step.
//!
//! A [`Contact`] groups every contact point between one pair of bodies. The
//! impulse of a contact is the vector sum of its point impulses.

use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};

use crate::BodyId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single contact point between two bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactPoint {
    /// Contact point in world coordinates.
    pub position: Point3<f64>,
    /// Contact normal (pointing from A to B).
    pub normal: Vector3<f64>,
    /// Impulse applied at this point during the step.
    pub impulse: Vector3<f64>,
}

impl ContactPoint {
    /// Create a contact point.
    #[must_use]
    pub fn new(position: Point3<f64>, normal: Vector3<f64>, impulse: Vector3<f64>) -> Self {
        Self {
            position,
            normal,
            impulse,
        }
    }

    /// A contact point at the origin carrying only an impulse.
    #[must_use]
    pub fn with_impulse(impulse: Vector3<f64>) -> Self {
        Self::new(Point3::origin(), Vector3::z(), impulse)
    }
}

/// The other participant of a contact, seen from one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactPartner {
    /// Another dynamic or kinematic body.
    Body(BodyId),
    /// The static environment (ground, table top).
    Environment,
}

/// All contact points between a pair of bodies during one step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contact {
    /// First body in contact.
    pub body_a: BodyId,
    /// Second body in contact (`None` for the static environment).
    pub body_b: Option<BodyId>,
    /// Contact points for this pair.
    pub points: Vec<ContactPoint>,
}

impl Contact {
    /// Create a contact between two bodies.
    #[must_use]
    pub fn between_bodies(body_a: BodyId, body_b: BodyId, points: Vec<ContactPoint>) -> Self {
        Self {
            body_a,
            body_b: Some(body_b),
            points,
        }
    }

    /// Create a contact with the static environment.
    #[must_use]
    pub fn with_environment(body: BodyId, points: Vec<ContactPoint>) -> Self {
        Self {
            body_a: body,
            body_b: None,
            points,
        }
    }

    /// Check if this contact involves a specific body.
    #[must_use]
    pub fn involves_body(&self, body: BodyId) -> bool {
        self.body_a == body || self.body_b == Some(body)
    }

    /// The other participant, if `body` takes part in this contact.
    #[must_use]
    pub fn partner_of(&self, body: BodyId) -> Option<ContactPartner> {
        if self.body_a == body {
            Some(match self.body_b {
                Some(other) => ContactPartner::Body(other),
                None => ContactPartner::Environment,
            })
        } else if self.body_b == Some(body) {
            Some(ContactPartner::Body(self.body_a))
        } else {
            None
        }
    }

    /// Sum of the point impulses.
    #[must_use]
    pub fn total_impulse(&self) -> Vector3<f64> {
        self.points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.impulse)
    }

    /// Magnitude of the summed impulse.
    #[must_use]
    pub fn impulse_magnitude(&self) -> f64 {
        self.total_impulse().norm()
    }
}

/// Whether any body in `bodies` touches `other` with an impulse above `threshold`.
///
/// Used to derive "gripper fingers touch the source object" from the raw
/// contact list, with `bodies` set to the finger links.
#[must_use]
pub fn touching(
    contacts: &[Contact],
    bodies: &HashSet<BodyId>,
    other: BodyId,
    threshold: f64,
) -> bool {
    contacts.iter().any(|c| {
        matches!(c.partner_of(other), Some(ContactPartner::Body(b)) if bodies.contains(&b))
            && c.impulse_magnitude() > threshold
    })
}
