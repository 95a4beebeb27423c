use core::fmt;
use grid_util::point::Point;

use crate::{Heuristic, PathingGrid, Result};

pub mod astar;

/// A pathfinding algorithm searching a [PathingGrid] it has been configured with.
pub trait Pathfinder {
    /// Finds a route from `start` to `goal`, both included.
    fn find_path(&mut self, start: Point, goal: Point) -> Result<Route>;

    fn set_heuristic<H: Heuristic + 'static>(&mut self, heuristic: H);

    fn set_grid(&mut self, grid: PathingGrid);
}

/// An ordered sequence of adjacent cells from start to goal, together with its total movement
/// cost. Never empty: when start equals goal it holds a single cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    points: Vec<Point>,
    cost: f64,
}

impl Route {
    pub(crate) fn new(points: Vec<Point>, cost: f64) -> Route {
        debug_assert!(!points.is_empty());
        Route { points, cost }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Number of cells, including both endpoints.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Summed movement cost along the route.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn goal(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.points.contains(point)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cells = self
            .points
            .iter()
            .map(|p| format!("({},{})", p.x, p.y))
            .collect::<Vec<_>>();
        write!(f, "{} [cost={:.2}]", cells.join(" -> "), self.cost)
    }
}
