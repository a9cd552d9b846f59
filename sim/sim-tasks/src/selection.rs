//! Episode index mapping.

use serde::{Deserialize, Serialize};

/// Which layout row and orientation row an episode uses.
///
/// Episode ids enumerate orientation rows fastest:
/// `episode_id = position_index * num_orientations + orientation_index`.
/// Ids past the end wrap around.
///
/// ```
/// use sim_tasks::EpisodeSelection;
///
/// let s = EpisodeSelection::from_index(5, 12, 2).unwrap();
/// assert_eq!((s.position_index, s.orientation_index), (2, 1));
/// assert_eq!(s.episode_index(2), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeSelection {
    /// Row of the layout table.
    pub position_index: usize,
    /// Row of the orientation table.
    pub orientation_index: usize,
}

impl EpisodeSelection {
    /// Map an episode id onto the layout and orientation tables.
    ///
    /// Returns `None` only when either table is empty.
    #[must_use]
    pub fn from_index(
        episode_id: u64,
        num_positions: usize,
        num_orientations: usize,
    ) -> Option<Self> {
        let total = (num_positions as u64).checked_mul(num_orientations as u64)?;
        if total == 0 {
            return None;
        }
        let wrapped = episode_id % total;
        let orientations = num_orientations as u64;
        Some(Self {
            position_index: usize::try_from(wrapped / orientations).ok()?,
            orientation_index: usize::try_from(wrapped % orientations).ok()?,
        })
    }

    /// Canonical episode id for this selection.
    #[must_use]
    pub fn episode_index(self, num_orientations: usize) -> u64 {
        self.position_index as u64 * num_orientations as u64 + self.orientation_index as u64
    }
}
