use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar::{AstarSolver, HeuristicKind, MovementModel, Pathfinder, PathingGrid};
use grid_util::point::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

const N: i32 = 64;

fn random_grid(rng: &mut StdRng, model: MovementModel) -> PathingGrid {
    let mut grid = PathingGrid::new(N, N, model).unwrap();
    for x in 0..N {
        for y in 0..N {
            if rng.gen_bool(0.25) {
                grid.set_obstacle(x, y).unwrap();
            }
        }
    }
    grid.clear_obstacle(0, 0).unwrap();
    grid.clear_obstacle(N - 1, N - 1).unwrap();
    grid.generate_components();
    grid
}

fn random_bench(c: &mut Criterion) {
    for (model, kinds) in [
        (
            MovementModel::FourDirectional,
            [HeuristicKind::Manhattan, HeuristicKind::Zero],
        ),
        (
            MovementModel::EightDirectional,
            [HeuristicKind::DiagonalCost, HeuristicKind::Zero],
        ),
    ] {
        let mut rng = StdRng::seed_from_u64(0);
        let grid = random_grid(&mut rng, model);
        let diag_str = match model {
            MovementModel::FourDirectional => "4-grid",
            MovementModel::EightDirectional => "8-grid",
        };
        for kind in kinds {
            let mut solver = AstarSolver::with_grid(grid.clone(), kind);
            let start = Point::new(0, 0);
            let end = Point::new(N - 1, N - 1);
            c.bench_function(format!("random {N}x{N}, {diag_str}, {kind}").as_str(), |b| {
                b.iter(|| black_box(solver.find_path(start, end)))
            });
        }
    }
}

criterion_group!(benches, random_bench);
criterion_main!(benches);
