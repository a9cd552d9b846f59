//! Evaluation configuration.
//!
//! Thresholds are expressed in simulation length units (meters) and impulse
//! units. The defaults reproduce the benchmark's published numbers; changing
//! them changes what counts as success.

use sim_types::SimError;

use crate::SuccessPolicy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed thresholds used by the outcome predicates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Thresholds {
    /// End-effector to source distance below which the agent counts as engaging the source.
    pub intention_distance: f64,
    /// Planar displacement an object must exceed to count as moved.
    pub displacement: f64,
    /// Consecutive grasped steps needed for a stable grasp.
    pub consecutive_grasp_steps: u32,
    /// Slack added to the target's planar half-extent when placing on it.
    pub xy_tolerance: f64,
    /// Planar slack used when the goal is to keep the source off the target.
    pub inverted_xy_tolerance: f64,
    /// Impulse magnitude above which a contact is considered load-bearing.
    pub contact_impulse: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            intention_distance: 0.05,
            displacement: 0.03,
            consecutive_grasp_steps: 5,
            xy_tolerance: 0.003,
            inverted_xy_tolerance: 0.01,
            contact_impulse: 1e-6,
        }
    }
}

impl Thresholds {
    /// Validate the thresholds.
    pub fn validate(&self) -> sim_types::Result<()> {
        let lengths = [
            ("intention_distance", self.intention_distance),
            ("displacement", self.displacement),
            ("xy_tolerance", self.xy_tolerance),
            ("inverted_xy_tolerance", self.inverted_xy_tolerance),
            ("contact_impulse", self.contact_impulse),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::invalid_config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if self.consecutive_grasp_steps == 0 {
            return Err(SimError::invalid_config(
                "consecutive_grasp_steps must be at least 1",
            ));
        }

        Ok(())
    }
}

/// Per-task evaluation options.
///
/// # Example
///
/// ```
/// use sim_eval::{EvaluationConfig, SuccessPolicy};
///
/// // Partial placement allowed, as for a spoon on a towel.
/// let config = EvaluationConfig::default().with_complete_placement(false);
/// assert!(config.validate().is_ok());
///
/// let basket = EvaluationConfig::default()
///     .with_complete_placement(false)
///     .with_vertical_offset_tolerance(0.06);
/// assert_eq!(basket.policy, SuccessPolicy::PlaceOnTarget);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvaluationConfig {
    /// Reject placement while the source also rests on something other than the target.
    pub require_source_completely_on_target: bool,
    /// Allowed gap between the source bottom and the target top.
    pub vertical_offset_tolerance: f64,
    /// How predicates combine into success.
    pub policy: SuccessPolicy,
    /// Predicate thresholds.
    pub thresholds: Thresholds,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            require_source_completely_on_target: true,
            vertical_offset_tolerance: 0.02,
            policy: SuccessPolicy::PlaceOnTarget,
            thresholds: Thresholds::default(),
        }
    }
}

impl EvaluationConfig {
    /// Configuration for a task whose goal is to keep the source off the target.
    #[must_use]
    pub fn place_away() -> Self {
        Self {
            policy: SuccessPolicy::PlaceAwayFromTarget,
            ..Default::default()
        }
    }

    /// Set whether the source must rest only on the target.
    #[must_use]
    pub fn with_complete_placement(mut self, required: bool) -> Self {
        self.require_source_completely_on_target = required;
        self
    }

    /// Set the vertical offset tolerance.
    #[must_use]
    pub fn with_vertical_offset_tolerance(mut self, tolerance: f64) -> Self {
        self.vertical_offset_tolerance = tolerance;
        self
    }

    /// Set the success policy.
    #[must_use]
    pub fn with_policy(mut self, policy: SuccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Planar slack in effect for the configured policy.
    #[must_use]
    pub fn xy_tolerance(&self) -> f64 {
        self.policy.xy_tolerance(&self.thresholds)
    }

    /// Whether the contact exclusivity refinement runs.
    #[must_use]
    pub fn checks_contact_exclusivity(&self) -> bool {
        self.require_source_completely_on_target && self.policy.allows_contact_exclusivity()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> sim_types::Result<()> {
        if !self.vertical_offset_tolerance.is_finite() || self.vertical_offset_tolerance < 0.0 {
            return Err(SimError::invalid_config(format!(
                "vertical_offset_tolerance must be finite and non-negative, got {}",
                self.vertical_offset_tolerance
            )));
        }

        self.thresholds.validate()
    }
}
