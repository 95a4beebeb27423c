use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use log::{debug, info, warn};
use smallvec::SmallVec;

use crate::{
    solver::{Pathfinder, Route},
    Heuristic, HeuristicKind, OpenSet, PathError, PathingGrid, Result, N_SMALLVEC_SIZE,
};

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// A* search over a [PathingGrid]. The grid and heuristic are configured up front; the open and
/// closed sets are reset at the start of every [find_path](Pathfinder::find_path), so one solver
/// can be reused for any number of sequential searches.
pub struct AstarSolver {
    grid: Option<PathingGrid>,
    heuristic: Option<Box<dyn Heuristic>>,
    /// Scales every heuristic estimate. Values above 1.0 give Weighted A*, which usually expands
    /// fewer nodes but no longer guarantees an optimal route.
    pub heuristic_factor: f64,
    /// Reject goals on a different connected component before searching.
    pub use_components: bool,
    open_set: OpenSet,
    /// Closed positions of the last search, in expansion order.
    closed_set: FxIndexSet<Point>,
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver {
            grid: None,
            heuristic: None,
            heuristic_factor: 1.0,
            use_components: true,
            open_set: OpenSet::new(),
            closed_set: FxIndexSet::default(),
        }
    }
}

impl AstarSolver {
    /// A solver with neither grid nor heuristic; both must be set before searching.
    pub fn new() -> AstarSolver {
        AstarSolver::default()
    }

    pub fn with_grid<H: Heuristic + 'static>(grid: PathingGrid, heuristic: H) -> AstarSolver {
        let mut solver = AstarSolver::new();
        solver.set_grid(grid);
        solver.set_heuristic(heuristic);
        solver
    }

    /// Selects one of the built-in heuristics by name, see
    /// [supported_heuristics](crate::supported_heuristics).
    pub fn set_heuristic_by_name(&mut self, name: &str) -> Result<()> {
        let kind: HeuristicKind = name.parse()?;
        self.set_heuristic(kind);
        Ok(())
    }

    pub fn clear_heuristic(&mut self) {
        self.heuristic = None;
    }

    pub fn grid(&self) -> Option<&PathingGrid> {
        self.grid.as_ref()
    }

    /// Mutable access for editing obstacles or costs between searches.
    pub fn grid_mut(&mut self) -> Option<&mut PathingGrid> {
        self.grid.as_mut()
    }

    pub fn take_grid(&mut self) -> Option<PathingGrid> {
        self.grid.take()
    }

    /// Positions expanded by the last search, in the order they were closed.
    pub fn expanded(&self) -> impl Iterator<Item = &Point> {
        self.closed_set.iter()
    }
}

impl Pathfinder for AstarSolver {
    fn set_heuristic<H: Heuristic + 'static>(&mut self, heuristic: H) {
        self.heuristic = Some(Box::new(heuristic));
    }

    fn set_grid(&mut self, grid: PathingGrid) {
        self.grid = Some(grid);
    }

    fn find_path(&mut self, start: Point, goal: Point) -> Result<Route> {
        let AstarSolver {
            grid,
            heuristic,
            heuristic_factor,
            use_components,
            open_set,
            closed_set,
        } = self;
        let grid = grid
            .as_mut()
            .ok_or(PathError::InvalidInput("grid must be set before searching"))?;
        let heuristic = heuristic
            .as_deref()
            .ok_or(PathError::InvalidInput("heuristic must be set before searching"))?;
        if !grid.is_valid_position(start.x, start.y) {
            return Err(PathError::InvalidInput("start lies outside the grid"));
        }
        if !grid.is_valid_position(goal.x, goal.y) {
            return Err(PathError::InvalidInput("goal lies outside the grid"));
        }
        for endpoint in [start, goal] {
            if grid.is_blocked(endpoint.x, endpoint.y) {
                return Err(PathError::BlockedEndpoint(endpoint));
            }
        }
        if start == goal {
            return Ok(Route::new(vec![start], 0.0));
        }

        open_set.clear();
        closed_set.clear();
        grid.reset_all();

        if *use_components {
            grid.update();
            if grid.unreachable(&start, &goal) {
                info!("{} is not reachable from {}", goal, start);
                return Err(PathError::NoPathFound { start, goal });
            }
        }

        debug!("Searching from {} to {}", start, goal);
        let h_scale = *heuristic_factor;
        let start_node = grid.get_node_mut(start.x, start.y)?;
        start_node.g = 0.0;
        start_node.h = h_scale * heuristic.estimate(&start, &goal);
        start_node.recompute_total();
        start_node.predecessor = None;
        open_set.insert_or_improve(*start_node);

        while let Some(current) = open_set.extract_min() {
            if current.position == goal {
                let route = reconstruct_route(grid, goal, current.g);
                debug!(
                    "Found route from {} to {} with cost {:.3} after expanding {} nodes",
                    start,
                    goal,
                    route.cost(),
                    closed_set.len()
                );
                return Ok(route);
            }
            closed_set.insert(current.position);

            let successors = grid
                .neighbors(&current.position)
                .iter()
                .filter(|n| !closed_set.contains(&n.position))
                .map(|n| (n.position, current.g + grid.movement_cost(&current, n)))
                .collect::<SmallVec<[(Point, f64); N_SMALLVEC_SIZE]>>();
            for (position, tentative_g) in successors {
                let queued = open_set.contains(&position);
                let neighbor = grid.get_node_mut(position.x, position.y)?;
                if !queued || tentative_g < neighbor.g {
                    neighbor.g = tentative_g;
                    neighbor.h = h_scale * heuristic.estimate(&position, &goal);
                    neighbor.recompute_total();
                    neighbor.predecessor = Some(current.position);
                    open_set.insert_or_improve(*neighbor);
                }
            }
        }
        if *use_components {
            warn!("Reachable goal could not be pathed to, are the components correct?");
        }
        Err(PathError::NoPathFound { start, goal })
    }
}

/// Follows predecessor links back from the goal and reverses them into a route.
fn reconstruct_route(grid: &PathingGrid, goal: Point, cost: f64) -> Route {
    let mut points = std::iter::successors(Some(goal), |p| {
        grid.get_node(p.x, p.y).ok().and_then(|n| n.predecessor)
    })
    .collect::<Vec<Point>>();
    points.reverse();
    Route::new(points, cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MovementModel, C, D};

    fn solver(w: i32, h: i32, model: MovementModel, kind: HeuristicKind) -> AstarSolver {
        AstarSolver::with_grid(PathingGrid::new(w, h, model).unwrap(), kind)
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        for model in [MovementModel::FourDirectional, MovementModel::EightDirectional] {
            let mut solver = solver(1, 1, model, HeuristicKind::Manhattan);
            let start = Point::new(0, 0);
            let route = solver.find_path(start, start).unwrap();
            assert_eq!(route.points(), &[start]);
            assert_eq!(route.cost(), 0.0);
        }
    }

    /// Asserts that the optimal solution around a central obstacle is found.
    #[test]
    fn solve_simple_problem() {
        for (model, kind, expected) in [
            (MovementModel::FourDirectional, HeuristicKind::Manhattan, 5),
            (MovementModel::EightDirectional, HeuristicKind::DiagonalCost, 4),
        ] {
            let mut solver = solver(3, 3, model, kind);
            solver.grid_mut().unwrap().set_obstacle(1, 1).unwrap();
            let route = solver
                .find_path(Point::new(0, 0), Point::new(2, 2))
                .unwrap();
            assert_eq!(route.len(), expected);
            assert!(!route.contains(&Point::new(1, 1)));
        }
    }

    #[test]
    fn missing_configuration() {
        let mut empty = AstarSolver::new();
        assert!(matches!(
            empty.find_path(Point::new(0, 0), Point::new(1, 1)),
            Err(PathError::InvalidInput(_))
        ));
        let mut solver = solver(
            2,
            2,
            MovementModel::FourDirectional,
            HeuristicKind::Manhattan,
        );
        solver.clear_heuristic();
        assert!(matches!(
            solver.find_path(Point::new(0, 0), Point::new(1, 1)),
            Err(PathError::InvalidInput(_))
        ));
    }

    #[test]
    fn endpoints_outside_grid() {
        let mut solver = solver(
            2,
            2,
            MovementModel::FourDirectional,
            HeuristicKind::Manhattan,
        );
        for (start, goal) in [
            (Point::new(-1, 0), Point::new(1, 1)),
            (Point::new(0, 0), Point::new(2, 1)),
        ] {
            assert!(matches!(
                solver.find_path(start, goal),
                Err(PathError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn blocked_endpoints() {
        let mut solver = solver(
            3,
            3,
            MovementModel::EightDirectional,
            HeuristicKind::Diagonal,
        );
        solver.grid_mut().unwrap().set_obstacle(2, 2).unwrap();
        let open = Point::new(0, 0);
        let blocked = Point::new(2, 2);
        assert_eq!(
            solver.find_path(open, blocked),
            Err(PathError::BlockedEndpoint(blocked))
        );
        assert_eq!(
            solver.find_path(blocked, open),
            Err(PathError::BlockedEndpoint(blocked))
        );
        assert_eq!(
            solver.find_path(blocked, blocked),
            Err(PathError::BlockedEndpoint(blocked))
        );
    }

    #[test]
    fn no_path_with_and_without_components() {
        for use_components in [true, false] {
            let mut solver = solver(
                3,
                3,
                MovementModel::FourDirectional,
                HeuristicKind::Manhattan,
            );
            solver.use_components = use_components;
            for y in 0..3 {
                solver.grid_mut().unwrap().set_obstacle(1, y).unwrap();
            }
            let start = Point::new(0, 1);
            let goal = Point::new(2, 1);
            assert_eq!(
                solver.find_path(start, goal),
                Err(PathError::NoPathFound { start, goal })
            );
        }
    }

    #[test]
    fn heuristic_by_name() {
        let mut solver = AstarSolver::new();
        solver.set_grid(PathingGrid::new(4, 4, MovementModel::EightDirectional).unwrap());
        assert_eq!(
            solver.set_heuristic_by_name("octile"),
            Err(PathError::UnknownHeuristic("octile".to_owned()))
        );
        assert!(solver.find_path(Point::new(0, 0), Point::new(3, 3)).is_err());
        solver.set_heuristic_by_name("diagonal_cost").unwrap();
        let route = solver.find_path(Point::new(0, 0), Point::new(3, 3)).unwrap();
        assert_eq!(route.len(), 4);
        assert!((route.cost() - 3.0 * D).abs() < 1e-9);
    }

    #[test]
    fn closure_heuristic() {
        let mut solver = AstarSolver::new();
        solver.set_grid(PathingGrid::new(5, 1, MovementModel::FourDirectional).unwrap());
        solver.set_heuristic(|p1: &Point, p2: &Point| (p1.x - p2.x).abs() as f64);
        let route = solver.find_path(Point::new(4, 0), Point::new(0, 0)).unwrap();
        assert_eq!(route.start(), Point::new(4, 0));
        assert_eq!(route.goal(), Point::new(0, 0));
        assert_eq!(route.cost(), 4.0 * C);
    }

    #[test]
    fn zero_heuristic_expands_more() {
        let mut guided = solver(
            10,
            10,
            MovementModel::FourDirectional,
            HeuristicKind::Manhattan,
        );
        let mut uniform = solver(10, 10, MovementModel::FourDirectional, HeuristicKind::Zero);
        let start = Point::new(0, 0);
        let goal = Point::new(9, 0);
        let guided_route = guided.find_path(start, goal).unwrap();
        let uniform_route = uniform.find_path(start, goal).unwrap();
        assert_eq!(guided_route.cost(), uniform_route.cost());
        assert!(guided.expanded().count() < uniform.expanded().count());
        assert_eq!(guided.expanded().next(), Some(&start));
    }

    #[test]
    fn weighted_terrain_is_avoided() {
        // A costly column forces a detour through the bottom row
        let mut solver = solver(
            3,
            3,
            MovementModel::FourDirectional,
            HeuristicKind::Manhattan,
        );
        {
            let grid = solver.grid_mut().unwrap();
            grid.set_cost_multiplier(1, 0, 10.0).unwrap();
            grid.set_cost_multiplier(1, 1, 10.0).unwrap();
        }
        let route = solver.find_path(Point::new(0, 0), Point::new(2, 0)).unwrap();
        assert!(route.contains(&Point::new(1, 2)));
        assert_eq!(route.cost(), 6.0);
        let grid = solver.grid().unwrap();
        assert_eq!(grid.path_cost(route.points()).unwrap(), route.cost());
    }

    #[test]
    fn route_is_contiguous() {
        let mut solver = solver(
            6,
            6,
            MovementModel::EightDirectional,
            HeuristicKind::Euclidean,
        );
        let route = solver.find_path(Point::new(0, 5), Point::new(5, 1)).unwrap();
        for pair in route.points().windows(2) {
            assert_eq!(pair[0].move_distance(&pair[1]), 1);
        }
    }

    #[test]
    fn heuristic_factor_scales_estimates() {
        let start = Point::new(0, 0);
        let goal = Point::new(19, 19);
        let mut uniform = solver(20, 20, MovementModel::FourDirectional, HeuristicKind::Zero);
        let uniform_route = uniform.find_path(start, goal).unwrap();

        let mut solver = solver(
            20,
            20,
            MovementModel::FourDirectional,
            HeuristicKind::Manhattan,
        );
        solver.heuristic_factor = 0.0;
        let route = solver.find_path(start, goal).unwrap();
        assert_eq!(route.cost(), uniform_route.cost());
        assert_eq!(solver.expanded().count(), uniform.expanded().count());
        let unguided = solver.expanded().count();

        solver.heuristic_factor = 1.0;
        let route = solver.find_path(start, goal).unwrap();
        assert_eq!(route.cost(), 38.0);
        assert!(solver.expanded().count() < unguided);

        // Weighted A*: the factor only inflates h, the reported cost is still the true g
        solver.heuristic_factor = 5.0;
        let route = solver.find_path(start, goal).unwrap();
        assert_eq!(route.start(), start);
        assert_eq!(route.goal(), goal);
        assert!(route.cost() >= 38.0);
        let grid = solver.grid().unwrap();
        assert_eq!(grid.path_cost(route.points()).unwrap(), route.cost());
        for pair in route.points().windows(2) {
            assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
        }
    }

    /// Cells cheaper than a straight move make distance heuristics overestimate.
    #[test]
    fn cheap_cells_void_optimality() {
        // |S...G|
        // |.....|
        // |,,,,,|  , has cost multiplier 0.1
        let build = |kind| {
            let mut solver = solver(5, 3, MovementModel::FourDirectional, kind);
            for x in 0..5 {
                solver
                    .grid_mut()
                    .unwrap()
                    .set_cost_multiplier(x, 2, 0.1)
                    .unwrap();
            }
            solver
        };
        let start = Point::new(0, 0);
        let goal = Point::new(4, 0);
        let guided = build(HeuristicKind::Manhattan).find_path(start, goal).unwrap();
        let uniform = build(HeuristicKind::Zero).find_path(start, goal).unwrap();
        assert_eq!(guided.cost(), 4.0);
        assert!((uniform.cost() - 3.5).abs() < 1e-9);
        assert!(uniform.contains(&Point::new(2, 2)));
    }
}
