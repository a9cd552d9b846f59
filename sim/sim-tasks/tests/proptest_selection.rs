//! Property-based tests for episode selection and layout generation.
//!
//! Run with: cargo test -p sim-tasks -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used)]

use nalgebra::Vector2;
use proptest::prelude::*;
use sim_tasks::{linspace, pairs_with_remaining, square_corners, EpisodeSelection, TaskRegistry};

// =============================================================================
// Episode selection
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn proptest_selection_is_total(
        episode_id in any::<u64>(),
        positions in 1usize..64,
        orientations in 1usize..16,
    ) {
        let selection = EpisodeSelection::from_index(episode_id, positions, orientations).unwrap();
        prop_assert!(selection.position_index < positions);
        prop_assert!(selection.orientation_index < orientations);
    }

    #[test]
    fn proptest_selection_inverts_canonical_ids(
        positions in 1usize..64,
        orientations in 1usize..16,
        seed in any::<u64>(),
    ) {
        let total = (positions * orientations) as u64;
        let episode_id = seed % total;
        let selection = EpisodeSelection::from_index(episode_id, positions, orientations).unwrap();
        prop_assert_eq!(selection.episode_index(orientations), episode_id);

        // Ids past the table wrap onto the same selection.
        let wrapped = EpisodeSelection::from_index(episode_id + total, positions, orientations);
        prop_assert_eq!(wrapped, Some(selection));
    }

    #[test]
    fn proptest_empty_tables_select_nothing(episode_id in any::<u64>(), n in 0usize..8) {
        prop_assert!(EpisodeSelection::from_index(episode_id, 0, n).is_none());
        prop_assert!(EpisodeSelection::from_index(episode_id, n, 0).is_none());
    }
}

// =============================================================================
// Layout generators
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_pairs_keep_every_point(
        x in -0.5..0.5f64,
        y in -0.5..0.5f64,
        half in 0.01..0.3f64,
    ) {
        let corners = square_corners(Vector2::new(x, y), half, half);
        let layouts = pairs_with_remaining(&corners);
        prop_assert_eq!(layouts.len(), 12);

        for layout in &layouts {
            prop_assert_eq!(layout.len(), 4);
            prop_assert!(layout.positions[0] != layout.positions[1]);
            for corner in &corners {
                prop_assert!(layout.positions.contains(corner));
            }
        }
    }

    #[test]
    fn proptest_linspace_spans_endpoints(
        start in -1.0..1.0f64,
        span in 0.0..2.0f64,
        count in 2usize..20,
    ) {
        let end = start + span;
        let values = linspace(start, end, count);
        prop_assert_eq!(values.len(), count);
        prop_assert_eq!(values[0], start);
        prop_assert_eq!(values[count - 1], end);
        prop_assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }
}

// =============================================================================
// Built-in tasks
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_builtin_episodes_resolve(episode_id in any::<u64>(), pick in any::<prop::sample::Index>()) {
        let registry = TaskRegistry::builtin().unwrap();
        let names = registry.names();
        let task = registry.get(names[pick.index(names.len())]).unwrap();

        let episode = task.episode(episode_id).unwrap();
        prop_assert_eq!(episode.positions.len(), task.object_count());
        prop_assert_eq!(episode.rotations.len(), task.object_count());
        prop_assert!(episode.episode_id < task.num_episodes());
    }
}
