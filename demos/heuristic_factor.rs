use grid_astar::{AstarSolver, HeuristicKind, MovementModel, Pathfinder, PathingGrid};
use grid_util::point::Point;

// The heuristic_factor can be set to scale the heuristic, causing nodes that are closer to the goal (ignoring obstacles)
// to be evaluated quicker than in normal operation. This is called Weighted A* and it can speed up the algorithm in certain scenarios,
// at the price of possibly returning a more expensive route.

fn main() {
    const N: i32 = 30;
    let mut pathing_grid = PathingGrid::new(N, N, MovementModel::EightDirectional).unwrap();
    for (x0, y0, w, h) in [(8, 8, 8, 8), (0, 3, 6, 6), (10, 0, 6, 6)] {
        for x in x0..x0 + w {
            for y in y0..y0 + h {
                pathing_grid.set_obstacle(x, y).unwrap();
            }
        }
    }
    println!("{}", pathing_grid);
    let mut solver = AstarSolver::with_grid(pathing_grid, HeuristicKind::DiagonalCost);
    let start = Point::new(1, 1);
    let end = Point::new(N - 3, N - 3);
    for factor in [1.0, 1.3, 3.0] {
        solver.heuristic_factor = factor;
        let route = solver.find_path(start, end).unwrap();
        println!(
            "factor {factor}: cost {:.2}, {} cells, {} nodes expanded",
            route.cost(),
            route.len(),
            solver.expanded().count()
        );
    }
}
