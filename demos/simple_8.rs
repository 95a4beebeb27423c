use grid_astar::{AstarSolver, MovementModel, Pathfinder, PathingGrid};
use grid_util::point::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood, and the heuristic is picked by name

fn main() {
    let mut pathing_grid = PathingGrid::new(3, 3, MovementModel::EightDirectional).unwrap();
    pathing_grid.set_obstacle(1, 1).unwrap();
    println!("{}", pathing_grid);
    let mut solver = AstarSolver::new();
    solver.set_grid(pathing_grid);
    solver.set_heuristic_by_name("diagonal_cost").unwrap();
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    match solver.find_path(start, end) {
        Ok(route) => println!("Path: {}", route),
        Err(e) => println!("{}", e),
    }
}
