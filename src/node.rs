use core::fmt;
use grid_util::point::Point;

/// A single grid cell. The position, obstacle flag and cost multiplier are static; `g`, `h`, `f`
/// and `predecessor` are search state that only means something during or right after a search
/// and is cleared by [reset](Node::reset).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub position: Point,
    pub is_obstacle: bool,
    /// Scales the base movement cost of entering this cell. Always positive.
    pub cost_multiplier: f64,
    /// Cost from the start along the best known route.
    pub g: f64,
    /// Heuristic estimate of the remaining cost to the goal.
    pub h: f64,
    /// `g + h`.
    pub f: f64,
    /// Position of the previous cell on the best known route. Always a cell of the same grid.
    pub predecessor: Option<Point>,
}

impl Node {
    pub fn new(x: i32, y: i32) -> Node {
        Node {
            position: Point::new(x, y),
            is_obstacle: false,
            cost_multiplier: 1.0,
            g: 0.0,
            h: 0.0,
            f: 0.0,
            predecessor: None,
        }
    }

    pub fn obstacle(x: i32, y: i32) -> Node {
        Node {
            is_obstacle: true,
            ..Node::new(x, y)
        }
    }

    /// Clears the search state, leaving position, obstacle flag and cost multiplier untouched.
    pub fn reset(&mut self) {
        self.g = 0.0;
        self.h = 0.0;
        self.f = 0.0;
        self.predecessor = None;
    }

    pub fn recompute_total(&mut self) {
        self.f = self.g + self.h;
    }

    pub fn same_position(&self, other: Option<&Node>) -> bool {
        other.is_some_and(|o| o.position == self.position)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Node({},{}) [g={:.2}, h={:.2}, f={:.2}] obstacle={}",
            self.position.x, self.position.y, self.g, self.h, self.f, self.is_obstacle
        )
    }
}
