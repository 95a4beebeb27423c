//! # grid_astar
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding on a rectangular grid.
//! Cells can be blocked or given a cost multiplier to model weighted terrain, movement is either
//! 4- or 8-directional, and the heuristic guiding the search is pluggable. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! ```
//! use grid_astar::{AstarSolver, HeuristicKind, MovementModel, PathingGrid, Pathfinder};
//! use grid_util::point::Point;
//!
//! let mut grid = PathingGrid::new(3, 3, MovementModel::FourDirectional).unwrap();
//! grid.set_obstacle(1, 1).unwrap();
//! let mut solver = AstarSolver::with_grid(grid, HeuristicKind::Manhattan);
//! let route = solver.find_path(Point::new(0, 0), Point::new(2, 2)).unwrap();
//! assert_eq!(route.len(), 5);
//! ```
mod error;
pub mod heuristic;
mod node;
pub mod open_set;
pub mod pathing_grid;
pub mod solver;

pub use error::{PathError, Result};
pub use heuristic::{supported_heuristics, Heuristic, HeuristicKind};
pub use node::Node;
pub use open_set::OpenSet;
pub use pathing_grid::{MovementModel, PathingGrid};
pub use solver::{astar::AstarSolver, Pathfinder, Route};

/// Cost of a straight (cardinal) move.
pub const C: f64 = 1.0;
/// Cost of a diagonal move.
pub const D: f64 = std::f64::consts::SQRT_2;

/// Inline capacity for neighbourhoods, enough for a full Moore neighbourhood.
pub const N_SMALLVEC_SIZE: usize = 8;
