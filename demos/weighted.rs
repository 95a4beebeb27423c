use grid_astar::{AstarSolver, HeuristicKind, MovementModel, Pathfinder, PathingGrid};
use grid_util::point::Point;

// A band of swamp (cost multiplier 5) runs across the middle of the map except for a ford at
// x = 8. Routes prefer the ford over wading straight through.

fn main() {
    const N: i32 = 10;
    let mut pathing_grid = PathingGrid::new(N, N, MovementModel::EightDirectional).unwrap();
    for x in 0..N {
        for y in 4..6 {
            if x != 8 {
                pathing_grid.set_cost_multiplier(x, y, 5.0).unwrap();
            }
        }
    }
    let mut solver = AstarSolver::with_grid(pathing_grid, HeuristicKind::DiagonalCost);
    let route = solver
        .find_path(Point::new(1, 0), Point::new(1, N - 1))
        .unwrap();
    println!("{}", route);
    println!("Expanded {} nodes", solver.expanded().count());
}
