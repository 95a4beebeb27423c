use grid_util::point::Point;
use thiserror::Error;

/// Errors reported by grid construction, grid access and path search.
///
/// All of them are terminal for the call that produced them; nothing in
/// this crate retries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },

    #[error("position ({x}, {y}) is out of bounds for grid {width}x{height}")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("endpoint {0} is an obstacle")]
    BlockedEndpoint(Point),

    #[error("no path found from {start} to {goal}")]
    NoPathFound { start: Point, goal: Point },

    #[error("unrecognized heuristic name: {0:?}")]
    UnknownHeuristic(String),

    #[error("cost multiplier {multiplier} at ({x}, {y}) must be positive and finite")]
    InvalidCostMultiplier { x: i32, y: i32, multiplier: f64 },
}

pub type Result<T> = std::result::Result<T, PathError>;
