use grid_astar::{AstarSolver, HeuristicKind, MovementModel, Pathfinder, PathingGrid};
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
// Nodes have a 4-neighborhood

fn main() {
    let mut pathing_grid = PathingGrid::new(3, 3, MovementModel::FourDirectional).unwrap();
    pathing_grid.set_obstacle(1, 1).unwrap();
    println!("{}", pathing_grid);
    let mut solver = AstarSolver::with_grid(pathing_grid, HeuristicKind::Manhattan);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let route = solver.find_path(start, end).unwrap();
    println!("Path:");
    for p in &route {
        println!("{:?}", p);
    }
}
