//! Object position tables.
//!
//! A [`LayoutConfig`] lists one tabletop xy position per task object, in the
//! order source, target, distractors. Tasks enumerate their candidate layouts
//! with the generators below.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Planar positions for every object of one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutConfig {
    /// Positions in object order: source, target, distractors.
    pub positions: Vec<Vector2<f64>>,
}

impl LayoutConfig {
    /// Create a layout from positions in object order.
    #[must_use]
    pub fn new(positions: Vec<Vector2<f64>>) -> Self {
        Self { positions }
    }

    /// Number of objects placed by this layout.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the layout places no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whether every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.positions.iter().all(|p| p.iter().all(|x| x.is_finite()))
    }
}

/// Corners of an axis-aligned rectangle, in the order
/// (−x, −y), (−x, +y), (+x, −y), (+x, +y).
///
/// ```
/// use sim_tasks::square_corners;
/// use nalgebra::Vector2;
///
/// let corners = square_corners(Vector2::new(-0.16, 0.0), 0.075, 0.075);
/// assert_eq!(corners[1], Vector2::new(-0.235, 0.075));
/// ```
#[must_use]
pub fn square_corners(center: Vector2<f64>, half_x: f64, half_y: f64) -> [Vector2<f64>; 4] {
    [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)]
        .map(|(sx, sy)| center + Vector2::new(sx * half_x, sy * half_y))
}

/// Every ordered pair of distinct points as a (source, target) layout.
#[must_use]
pub fn ordered_pairs(points: &[Vector2<f64>]) -> Vec<LayoutConfig> {
    distinct_pairs(points.len())
        .map(|(i, j)| LayoutConfig::new(vec![points[i], points[j]]))
        .collect()
}

/// Every ordered pair of distinct points, followed by the remaining points
/// in index order for the distractors.
#[must_use]
pub fn pairs_with_remaining(points: &[Vector2<f64>]) -> Vec<LayoutConfig> {
    distinct_pairs(points.len())
        .map(|(i, j)| {
            let mut positions = vec![points[i], points[j]];
            positions.extend(
                points
                    .iter()
                    .enumerate()
                    .filter(|&(k, _)| k != i && k != j)
                    .map(|(_, p)| *p),
            );
            LayoutConfig::new(positions)
        })
        .collect()
}

/// Ordered-pair layouts over the corners of several concentric squares.
#[must_use]
pub fn nested_squares(center: Vector2<f64>, half_lengths: &[f64]) -> Vec<LayoutConfig> {
    half_lengths
        .iter()
        .flat_map(|&h| ordered_pairs(&square_corners(center, h, h)))
        .collect()
}

/// `count` evenly spaced values from `start` to `end` inclusive.
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i + 1 == count { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Regular grid of points around `center`, x-major.
///
/// Spans `center ± half_span` with `counts.0` values along x and `counts.1`
/// along y.
#[must_use]
pub fn linspace_grid(
    center: Vector2<f64>,
    half_span: Vector2<f64>,
    counts: (usize, usize),
) -> Vec<Vector2<f64>> {
    let xs = linspace(-half_span.x, half_span.x, counts.0);
    let ys = linspace(-half_span.y, half_span.y, counts.1);
    xs.iter()
        .flat_map(|&x| ys.iter().map(move |&y| center + Vector2::new(x, y)))
        .collect()
}

/// Pair each source position with one fixed target position.
#[must_use]
pub fn with_fixed_target(sources: &[Vector2<f64>], target: Vector2<f64>) -> Vec<LayoutConfig> {
    sources
        .iter()
        .map(|&source| LayoutConfig::new(vec![source, target]))
        .collect()
}

fn distinct_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
}
