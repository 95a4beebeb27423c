use core::fmt;

use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use itertools::Itertools;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{Node, PathError, Result, C, D, N_SMALLVEC_SIZE};

/// Up, right, down, left. y grows downwards.
const NEUMANN_DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
/// Up, up-right, right, down-right, down, down-left, left, up-left.
const MOORE_DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Which cells count as adjacent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MovementModel {
    #[default]
    FourDirectional,
    EightDirectional,
}

impl MovementModel {
    /// Neighbour offsets in the order neighbours are reported.
    pub fn directions(&self) -> &'static [(i32, i32)] {
        match self {
            MovementModel::FourDirectional => &NEUMANN_DIRECTIONS,
            MovementModel::EightDirectional => &MOORE_DIRECTIONS,
        }
    }
}

impl fmt::Display for MovementModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MovementModel::FourDirectional => f.write_str("4-way"),
            MovementModel::EightDirectional => f.write_str("8-way"),
        }
    }
}

/// [PathingGrid] owns one [Node] per cell in a row-major [SimpleGrid], plus a [UnionFind]
/// structure recording which free cells are connected so that unreachable goals can be rejected
/// without a flood fill.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    grid: SimpleGrid<Node>,
    movement_model: MovementModel,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl PathingGrid {
    /// Creates a grid of free cells with a cost multiplier of 1.0.
    pub fn new(width: i32, height: i32, movement_model: MovementModel) -> Result<PathingGrid> {
        if width <= 0 || height <= 0 {
            return Err(PathError::InvalidDimension { width, height });
        }
        let (width, height) = (width as usize, height as usize);
        let mut nodes = SimpleGrid::new(width, height, Node::new(0, 0));
        for (ix, node) in nodes.values.iter_mut().enumerate() {
            node.position = Point::new((ix % width) as i32, (ix / width) as i32);
        }
        let mut grid = PathingGrid {
            grid: nodes,
            movement_model,
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn movement_model(&self) -> MovementModel {
        self.movement_model
    }

    /// Changing the movement model changes connectivity, so components are marked dirty.
    pub fn set_movement_model(&mut self, movement_model: MovementModel) {
        if self.movement_model != movement_model {
            self.movement_model = movement_model;
            self.components_dirty = true;
        }
    }

    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        self.grid.point_in_bounds(Point::new(x, y))
    }

    pub(crate) fn get_ix_point(&self, point: &Point) -> usize {
        self.grid.get_ix_point(point)
    }

    fn checked_ix(&self, x: i32, y: i32) -> Result<usize> {
        if self.is_valid_position(x, y) {
            Ok(self.grid.get_ix(x as usize, y as usize))
        } else {
            Err(PathError::OutOfBounds {
                x,
                y,
                width: self.grid.width(),
                height: self.grid.height(),
            })
        }
    }

    pub fn get_node(&self, x: i32, y: i32) -> Result<&Node> {
        let ix = self.checked_ix(x, y)?;
        Ok(&self.grid.values[ix])
    }

    pub fn get_node_mut(&mut self, x: i32, y: i32) -> Result<&mut Node> {
        let ix = self.checked_ix(x, y)?;
        Ok(&mut self.grid.values[ix])
    }

    /// Marks a cell as blocked. Blocking may split a component, so components are flagged as
    /// dirty instead of being regenerated on the spot.
    pub fn set_obstacle(&mut self, x: i32, y: i32) -> Result<()> {
        let ix = self.checked_ix(x, y)?;
        if !self.grid.values[ix].is_obstacle {
            self.grid.values[ix].is_obstacle = true;
            self.components_dirty = true;
        }
        Ok(())
    }

    /// Frees a cell and joins it with the components of its free neighbours.
    pub fn clear_obstacle(&mut self, x: i32, y: i32) -> Result<()> {
        let ix = self.checked_ix(x, y)?;
        if self.grid.values[ix].is_obstacle {
            self.grid.values[ix].is_obstacle = false;
            let joined = self
                .neighbors(&Point::new(x, y))
                .iter()
                .map(|n| self.get_ix_point(&n.position))
                .collect::<SmallVec<[usize; N_SMALLVEC_SIZE]>>();
            for n_ix in joined {
                self.components.union(ix, n_ix);
            }
        }
        Ok(())
    }

    /// Multipliers below 1.0 are accepted but void the optimality of distance heuristics, see
    /// [heuristic](crate::heuristic).
    pub fn set_cost_multiplier(&mut self, x: i32, y: i32, multiplier: f64) -> Result<()> {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(PathError::InvalidCostMultiplier { x, y, multiplier });
        }
        self.get_node_mut(x, y)?.cost_multiplier = multiplier;
        Ok(())
    }

    /// True for obstacles and for anything outside the grid.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        match self.get_node(x, y) {
            Ok(node) => node.is_obstacle,
            Err(_) => true,
        }
    }

    /// Free in-bounds neighbours of `point`, in the order given by
    /// [MovementModel::directions]. Empty for points outside the grid.
    pub fn neighbors(&self, point: &Point) -> SmallVec<[&Node; N_SMALLVEC_SIZE]> {
        if !self.grid.point_in_bounds(*point) {
            return SmallVec::new();
        }
        // In bounds, so offsets of one cannot overflow
        self.movement_model
            .directions()
            .iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| !self.is_blocked(p.x, p.y))
            .map(|p| &self.grid.values[self.grid.get_ix_point(&p)])
            .collect()
    }

    /// Uses [C] for straight moves and [D] for diagonal moves, scaled by the destination's cost
    /// multiplier.
    pub fn movement_cost(&self, from: &Node, to: &Node) -> f64 {
        let diagonal = from.position.x != to.position.x && from.position.y != to.position.y;
        let base = if diagonal { D } else { C };
        base * to.cost_multiplier
    }

    /// Sums the movement cost over consecutive cells of a route.
    pub fn path_cost(&self, path: &[Point]) -> Result<f64> {
        path.iter()
            .map(|p| self.get_node(p.x, p.y))
            .tuple_windows()
            .try_fold(0.0, |total, (from, to)| {
                Ok(total + self.movement_cost(from?, to?))
            })
    }

    /// Clears the search state of every node.
    pub fn reset_all(&mut self) {
        self.grid.values.iter_mut().for_each(Node::reset);
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.grid.values.iter()
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Positions outside the grid are
    /// always unreachable.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.is_valid_position(start.x, start.y) && self.is_valid_position(goal.x, goal.y) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours to the same components.
    pub fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.grid.values.len());
        for node in self.grid.values.iter().filter(|n| !n.is_obstacle) {
            let parent_ix = self.get_ix_point(&node.position);
            for n in self.neighbors(&node.position) {
                components.union(parent_ix, self.get_ix_point(&n.position));
            }
        }
        self.components = components;
        self.components_dirty = false;
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Grid {}x{} ({} movement):",
            self.grid.width,
            self.grid.height,
            self.movement_model
        )?;
        for row in self.grid.values.chunks(self.grid.width) {
            let line = row
                .iter()
                .map(|n| if n.is_obstacle { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
