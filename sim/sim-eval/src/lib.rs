//! Outcome evaluation for simulated put-on/put-in manipulation episodes.
//!
//! Given the after-settle [`SceneReference`](sim_types::SceneReference) of an
//! episode and a [`WorldSnapshot`](sim_types::WorldSnapshot) per simulation
//! step, this crate decides whether the source object has been moved, grasped
//! and placed, and whether the episode succeeded.
//!
//! # Components
//!
//! - [`OutcomeEvaluator`] - Per-step decision procedure
//! - [`EpisodeTracker`] - Grasp counter and accumulated [`EpisodeStats`]
//! - [`SuccessPolicy`] - Place-on-target vs. place-away-from-target verdicts
//! - [`Episode`] - Convenience driver owning all of the above
//!
//! # Statistics
//!
//! | Field                | Update       |
//! |----------------------|--------------|
//! | `moved_correct_obj`  | latest step  |
//! | `moved_wrong_obj`    | latest step  |
//! | `src_on_target`      | latest step  |
//! | `is_src_obj_grasped` | latched (OR) |
//! | `consecutive_grasp`  | latched (OR) |
//! | `source_intention`   | latched (OR) |
//!
//! # Example
//!
//! ```
//! use sim_eval::{Episode, EvaluationConfig, OutcomeEvaluator};
//! use sim_types::{BodyId, Pose, SceneReference, WorldSnapshot};
//! use nalgebra::{Point3, Vector2, Vector3};
//!
//! let reference = SceneReference::new(
//!     BodyId::new(1),
//!     BodyId::new(2),
//!     Point3::new(-0.2, 0.0, 0.9),
//!     Vector2::zeros(),
//!     Vector3::new(0.02, 0.02, 0.01),
//!     Vector3::new(0.05, 0.05, 0.02),
//! );
//!
//! let config = EvaluationConfig::default().with_complete_placement(false);
//! let mut episode = Episode::new(OutcomeEvaluator::new(config)?, reference)?;
//!
//! let placed = WorldSnapshot::new(
//!     Pose::from_position(Point3::new(0.0, 0.0, 0.94)),
//!     Pose::from_position(Point3::new(0.0, 0.0, 0.9)),
//!     Point3::new(0.0, 0.0, 1.0),
//! );
//! let result = episode.step(&placed)?;
//!
//! assert!(result.success);
//! assert!(result.moved_correct_obj);
//! # Ok::<(), sim_types::SimError>(())
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,     // Config methods stay non-const for float ops
    clippy::missing_errors_doc,        // Every error is SimError::InvalidSnapshot/InvalidConfig
    clippy::struct_excessive_bools,    // Result and stats records are flag sets
)]

mod config;
mod episode;
mod evaluator;
mod policy;
mod predicates;
mod stats;
mod tracker;

pub use config::{EvaluationConfig, Thresholds};
pub use episode::Episode;
pub use evaluator::{EvaluationResult, OutcomeEvaluator};
pub use policy::SuccessPolicy;
pub use predicates::{rests_on_other_body, source_intention, Displacements, Placement};
pub use stats::{EpisodeStats, GraspCounter, StepFlags};
pub use tracker::EpisodeTracker;

pub use sim_types::{Result, SimError};
