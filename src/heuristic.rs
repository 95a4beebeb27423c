//! Heuristics estimating the remaining cost between two cells.
//!
//! A heuristic must never overestimate the true remaining cost under the movement model it is
//! used with, otherwise the returned route is not guaranteed to be optimal. In particular
//! [Manhattan](HeuristicKind::Manhattan) overestimates on an 8-connected grid and should not be
//! paired with [EightDirectional](crate::MovementModel::EightDirectional) movement when optimal
//! routes are required. Obstacles are never taken into account.
//!
//! The estimates assume every cell costs at least a plain move, i.e. cost multipliers of 1.0 or
//! more. A cell with a multiplier below 1.0 makes every heuristic except
//! [Zero](HeuristicKind::Zero) inadmissible, and the returned route may then not be the cheapest.
use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;

use crate::{PathError, C, D};

/// Estimates the cost of getting from `p1` to `p2`.
pub trait Heuristic {
    fn estimate(&self, p1: &Point, p2: &Point) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(&Point, &Point) -> f64,
{
    fn estimate(&self, p1: &Point, p2: &Point) -> f64 {
        self(p1, p2)
    }
}

fn deltas(p1: &Point, p2: &Point) -> (f64, f64) {
    (
        (p1.x - p2.x).abs() as f64,
        (p1.y - p2.y).abs() as f64,
    )
}

/// `|dx| + |dy|`. Admissible for 4-directional movement only.
pub fn manhattan(p1: &Point, p2: &Point) -> f64 {
    p1.manhattan_distance(p2) as f64
}

/// Straight-line distance, admissible for any movement model.
pub fn euclidean(p1: &Point, p2: &Point) -> f64 {
    let (dx, dy) = deltas(p1, p2);
    dx.hypot(dy)
}

/// Squared straight-line distance. Preserves ordering but is not a distance, so it is not
/// admissible.
pub fn euclidean_squared(p1: &Point, p2: &Point) -> f64 {
    let (dx, dy) = deltas(p1, p2);
    dx * dx + dy * dy
}

/// [Chebyshev distance](https://en.wikipedia.org/wiki/Chebyshev_distance), exact on an
/// 8-connected grid where diagonal moves cost the same as straight ones.
pub fn diagonal(p1: &Point, p2: &Point) -> f64 {
    p1.move_distance(p2) as f64
}

/// Octile distance: the cost of taking as many diagonal steps as possible before going straight,
/// with straight moves costing [C] and diagonal moves [D].
pub fn diagonal_cost(p1: &Point, p2: &Point) -> f64 {
    let (dx, dy) = deltas(p1, p2);
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    C * (hi - lo) + D * lo
}

/// Always 0, which turns A* into Dijkstra's algorithm.
pub fn zero(_: &Point, _: &Point) -> f64 {
    0.0
}

/// The built-in heuristics as a closed set, selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeuristicKind {
    Manhattan,
    Euclidean,
    EuclideanSquared,
    Diagonal,
    DiagonalCost,
    Zero,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 6] = [
        HeuristicKind::Manhattan,
        HeuristicKind::Euclidean,
        HeuristicKind::EuclideanSquared,
        HeuristicKind::Diagonal,
        HeuristicKind::DiagonalCost,
        HeuristicKind::Zero,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::Euclidean => "euclidean",
            HeuristicKind::EuclideanSquared => "euclidean_squared",
            HeuristicKind::Diagonal => "diagonal",
            HeuristicKind::DiagonalCost => "diagonal_cost",
            HeuristicKind::Zero => "zero",
        }
    }

    /// The plain function implementing this heuristic.
    pub fn function(&self) -> fn(&Point, &Point) -> f64 {
        match self {
            HeuristicKind::Manhattan => manhattan,
            HeuristicKind::Euclidean => euclidean,
            HeuristicKind::EuclideanSquared => euclidean_squared,
            HeuristicKind::Diagonal => diagonal,
            HeuristicKind::DiagonalCost => diagonal_cost,
            HeuristicKind::Zero => zero,
        }
    }
}

impl Heuristic for HeuristicKind {
    fn estimate(&self, p1: &Point, p2: &Point) -> f64 {
        (self.function())(p1, p2)
    }
}

impl FromStr for HeuristicKind {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeuristicKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| PathError::UnknownHeuristic(s.to_owned()))
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Names accepted by [HeuristicKind::from_str], in canonical order.
pub fn supported_heuristics() -> Vec<&'static str> {
    HeuristicKind::ALL.iter().map(HeuristicKind::name).collect()
}
