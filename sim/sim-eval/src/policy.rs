//! Success-policy variants.

use crate::Thresholds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the step predicates combine into a success verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SuccessPolicy {
    /// Succeed when the source rests on the target.
    #[default]
    PlaceOnTarget,
    /// Succeed when the source was picked up with a stable grasp, moved, and
    /// set down anywhere except on the target.
    PlaceAwayFromTarget,
}

impl SuccessPolicy {
    /// Planar slack added to the target half-extent under this policy.
    #[must_use]
    pub fn xy_tolerance(self, thresholds: &Thresholds) -> f64 {
        match self {
            Self::PlaceOnTarget => thresholds.xy_tolerance,
            Self::PlaceAwayFromTarget => thresholds.inverted_xy_tolerance,
        }
    }

    /// Whether this policy may run the contact exclusivity refinement.
    #[must_use]
    pub const fn allows_contact_exclusivity(self) -> bool {
        matches!(self, Self::PlaceOnTarget)
    }

    /// Combine predicates into the success verdict.
    #[must_use]
    pub const fn is_success(
        self,
        src_on_target: bool,
        moved_correct_obj: bool,
        consecutive_grasp: bool,
    ) -> bool {
        match self {
            Self::PlaceOnTarget => src_on_target,
            Self::PlaceAwayFromTarget => !src_on_target && moved_correct_obj && consecutive_grasp,
        }
    }

    /// Placement flag stored in the episode statistics.
    ///
    /// Statistics track progress toward the goal, so the negated variant
    /// records "not on target".
    #[must_use]
    pub const fn recorded_placement(self, src_on_target: bool) -> bool {
        match self {
            Self::PlaceOnTarget => src_on_target,
            Self::PlaceAwayFromTarget => !src_on_target,
        }
    }
}

impl std::fmt::Display for SuccessPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlaceOnTarget => write!(f, "place on target"),
            Self::PlaceAwayFromTarget => write!(f, "place away from target"),
        }
    }
}
