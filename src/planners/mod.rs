//! Planning algorithms
//!
//! Graph-search planners (Dijkstra, A*, weighted A*, Theta*) operate
//! on the discrete grid environment; sampling-based planners (PRM,
//! Lazy PRM, RRT, RRT*, Informed RRT*) operate on bounded continuous
//! workspaces.

pub mod astar;
pub mod dijkstra;
pub mod heuristic;
pub mod informed_rrt_star;
pub mod lazy_prm;
pub mod prm;
pub mod rrt;
pub mod rrt_star;
pub mod theta_star;

pub use astar::AStarPlanner;
pub use dijkstra::DijkstraPlanner;
pub use heuristic::Heuristic;
pub use informed_rrt_star::{ConvergenceData, InformedRrtStarPlanner};
pub use lazy_prm::LazyPrmPlanner;
pub use prm::{PrmConfig, PrmPlanner};
pub use rrt::{RrtConfig, RrtPlanner};
pub use rrt_star::{RrtStarConfig, RrtStarPlanner};
pub use theta_star::ThetaStarPlanner;

use std::collections::HashMap;

use crate::common::{GridCoord, Path, State};

/// 8-connected motion model: (d_row, d_col, step cost).
pub(crate) const NEIGHBORS_8: [(i32, i32, f64); 8] = [
    (-1, 0, 1.0),
    (1, 0, 1.0),
    (0, -1, 1.0),
    (0, 1, 1.0),
    (-1, -1, std::f64::consts::SQRT_2),
    (-1, 1, std::f64::consts::SQRT_2),
    (1, -1, std::f64::consts::SQRT_2),
    (1, 1, std::f64::consts::SQRT_2),
];

/// Backtrack parent pointers from the goal, reverse, and recompute the
/// length from the coordinate sequence. The start cell is the one with
/// no parent entry.
pub(crate) fn reconstruct_grid_path(
    parent: &HashMap<GridCoord, GridCoord>,
    goal: GridCoord,
) -> Path {
    let mut states = vec![State::from_grid(goal.row, goal.col)];
    let mut cur = goal;
    while let Some(&p) = parent.get(&cur) {
        states.push(State::from_grid(p.row, p.col));
        cur = p;
    }
    states.reverse();
    let mut path = Path { states, success: true, length: 0.0 };
    path.compute_length();
    path
}

pub(crate) fn euclidean_cell_distance(a: GridCoord, b: GridCoord) -> f64 {
    let dr = (b.row - a.row) as f64;
    let dc = (b.col - a.col) as f64;
    dr.hypot(dc)
}
