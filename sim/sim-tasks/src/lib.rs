//! Declarative put-on/put-in manipulation tasks.
//!
//! A task is plain data: which objects appear, where and how they are placed
//! at the start of each episode, what the policy is told to do, and how
//! success is judged. This crate provides:
//!
//! - [`TaskDescriptor`] - One task, validated at registration
//! - [`LayoutConfig`] / [`OrientationConfig`] - Candidate initial states, with
//!   generators such as [`square_corners`] and [`pairs_with_remaining`]
//! - [`EpisodeSelection`] - Episode id → (layout row, orientation row)
//! - [`TaskRegistry`] - Name → descriptor table, including the built-in family
//!
//! # Example
//!
//! ```
//! use sim_tasks::TaskRegistry;
//!
//! let registry = TaskRegistry::builtin()?;
//! let task = registry.get("PutSpoonOnTableClothInScene-v0")?;
//!
//! let episode = task.episode(5)?;
//! assert_eq!(episode.selection.position_index, 2);
//! assert_eq!(episode.selection.orientation_index, 1);
//! assert_eq!(episode.positions.len(), 2);
//!
//! let evaluator = task.evaluator()?;
//! assert!(!evaluator.config().require_source_completely_on_target);
//! # Ok::<(), sim_tasks::TaskError>(())
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,  // Constructors allocate
    clippy::missing_errors_doc,    // Errors are TaskError variants
    clippy::cast_precision_loss,   // Table sizes are tiny
)]

mod builtin;
mod descriptor;
mod error;
mod layout;
pub mod orientation;
mod registry;
mod selection;

pub use descriptor::{EpisodeLayout, TaskDescriptor, DEFAULT_MAX_EPISODE_STEPS};
pub use error::TaskError;
pub use layout::{
    linspace, linspace_grid, nested_squares, ordered_pairs, pairs_with_remaining,
    square_corners, with_fixed_target, LayoutConfig,
};
pub use orientation::OrientationConfig;
pub use registry::TaskRegistry;
pub use selection::EpisodeSelection;

/// Result type for task operations.
pub type Result<T> = std::result::Result<T, TaskError>;
