//! Core data types for judging manipulation episodes.
//!
//! This crate provides the plain data exchanged between a physics simulation
//! and the episode evaluator:
//!
//! - [`Pose`] and [`BodyId`] - Rigid body identity and placement
//! - [`Contact`] - Per-step contact records with impulses
//! - [`SceneReference`] - After-settle reference captured once per episode
//! - [`WorldSnapshot`] - Poses, contacts and grasp signals for one step
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They carry no thresholds and no episode
//! state; the decision procedure lives in `sim-eval`.
//!
//! # Coordinate System
//!
//! - X: right
//! - Y: forward
//! - Z: up
//! - Right-handed
//!
//! "Planar" quantities are the xy components.
//!
//! # Example
//!
//! ```
//! use sim_types::{BodyId, Pose, SceneReference, WorldSnapshot};
//! use nalgebra::{Point3, Vector2, Vector3};
//!
//! let reference = SceneReference::new(
//!     BodyId::new(1),
//!     BodyId::new(2),
//!     Point3::new(-0.2, 0.0, 0.9),
//!     Vector2::new(-0.1, 0.1),
//!     Vector3::new(0.02, 0.05, 0.01),
//!     Vector3::new(0.08, 0.08, 0.01),
//! );
//!
//! let snapshot = WorldSnapshot::new(
//!     Pose::from_position(Point3::new(-0.2, 0.0, 0.9)),
//!     Pose::from_position(Point3::new(-0.1, 0.1, 0.88)),
//!     Point3::new(0.0, 0.0, 1.1),
//! );
//!
//! assert!(snapshot.validate(&reference).is_ok());
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,     // Many methods can't be const due to nalgebra
    clippy::missing_errors_doc,        // Error docs added where non-obvious
)]

mod body;
mod contact;
mod error;
mod scene;

pub use body::{planar_distance, BodyId, Pose};
pub use contact::{touching, Contact, ContactPartner, ContactPoint};
pub use error::SimError;
pub use scene::{DistractorReference, SceneReference, WorldSnapshot};

// Re-export math types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector2, Vector3};

/// Result type for evaluation inputs.
pub type Result<T> = std::result::Result<T, SimError>;
