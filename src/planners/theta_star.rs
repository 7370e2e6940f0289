//! Any-angle search over the occupancy grid
//!
//! Theta* relaxes each neighbor through the current node's parent when
//! an unobstructed straight line exists, so parent pointers skip grid
//! cells and the reconstructed path is taut rather than axis-aligned.
//!
//! Reference: Nash, Daniel, Koenig, Felner (2007),
//! "Theta*: Any-Angle Path Planning on Grids".

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use log::debug;
use ordered_float::OrderedFloat;

use crate::common::{GridCoord, Path, Planner, PlanningResult, State};
use crate::environment::Environment;
use crate::planners::{euclidean_cell_distance, reconstruct_grid_path, Heuristic, NEIGHBORS_8};

#[derive(Debug, Clone, Default)]
pub struct ThetaStarPlanner {
    heuristic: Heuristic,
}

impl ThetaStarPlanner {
    pub fn new(heuristic: Heuristic) -> Self {
        Self { heuristic }
    }
}

impl Planner for ThetaStarPlanner {
    fn solve(&self, env: &Environment, start: &State, goal: &State) -> PlanningResult {
        let Some(grid) = env.as_grid() else {
            debug!("theta_star: non-grid environment");
            return PlanningResult::failure();
        };
        let s = start.to_grid();
        let g = goal.to_grid();
        if grid.occupied(s.row, s.col) || grid.occupied(g.row, g.col) {
            debug!("theta_star: start or goal occupied");
            return PlanningResult::failure();
        }

        let h = |cell: GridCoord| self.heuristic.estimate(cell, g);

        let mut heap = BinaryHeap::new();
        let mut best: HashMap<GridCoord, f64> = HashMap::new();
        let mut parent: HashMap<GridCoord, GridCoord> = HashMap::new();
        best.insert(s, 0.0);
        heap.push(Reverse((OrderedFloat(h(s)), OrderedFloat(0.0), s)));

        let mut expanded = 0usize;
        while let Some(Reverse((_, OrderedFloat(cost), cell))) = heap.pop() {
            if cost > best.get(&cell).copied().unwrap_or(f64::INFINITY) + 1e-9 {
                continue;
            }
            expanded += 1;

            if cell == g {
                return PlanningResult {
                    path: reconstruct_grid_path(&parent, g),
                    nodes_expanded: expanded,
                };
            }

            let grandparent = parent.get(&cell).copied();

            for &(dr, dc, _) in &NEIGHBORS_8 {
                let next = GridCoord::new(cell.row + dr, cell.col + dc);
                if grid.occupied(next.row, next.col) {
                    continue;
                }

                // Path 2 first: connect the neighbor straight to the
                // current node's parent when line-of-sight allows it.
                let relaxed = match grandparent {
                    Some(p)
                        if env.collision_free(
                            &State::from_grid(p.row, p.col),
                            &State::from_grid(next.row, next.col),
                        ) =>
                    {
                        Some((best[&p] + euclidean_cell_distance(p, next), p))
                    }
                    _ => {
                        let from = State::from_grid(cell.row, cell.col);
                        let to = State::from_grid(next.row, next.col);
                        if env.collision_free(&from, &to) {
                            Some((cost + euclidean_cell_distance(cell, next), cell))
                        } else {
                            None
                        }
                    }
                };
                let Some((next_cost, next_parent)) = relaxed else {
                    continue;
                };

                if best.get(&next).is_some_and(|&c| c <= next_cost) {
                    continue;
                }
                best.insert(next, next_cost);
                parent.insert(next, next_parent);
                heap.push(Reverse((
                    OrderedFloat(next_cost + h(next)),
                    OrderedFloat(next_cost),
                    next,
                )));
            }
        }

        debug!("theta_star: frontier exhausted after {} expansions", expanded);
        PlanningResult { path: Path::failure(), nodes_expanded: expanded }
    }

    fn name(&self) -> &'static str {
        "theta_star"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::GridEnvironment;
    use crate::planners::AStarPlanner;

    fn walled_grid() -> GridEnvironment {
        let mut grid = GridEnvironment::empty(21, 21);
        for r in 5..15 {
            grid.set_occupied(r, 10, true);
        }
        grid
    }

    #[test]
    fn test_finds_path_around_wall() {
        let env = Environment::Grid(walled_grid());
        let result = ThetaStarPlanner::default().solve(
            &env,
            &State::from_grid(10, 2),
            &State::from_grid(10, 18),
        );
        assert!(result.path.success);
        assert!(result.path.states.len() >= 2);
    }

    #[test]
    fn test_never_longer_than_astar() {
        let env = Environment::Grid(walled_grid());
        let start = State::from_grid(2, 2);
        let goal = State::from_grid(18, 18);

        let theta = ThetaStarPlanner::default().solve(&env, &start, &goal);
        let astar = AStarPlanner::default().solve(&env, &start, &goal);
        assert!(theta.path.success);
        assert!(astar.path.success);
        assert!(theta.path.length <= astar.path.length + 1e-9);
    }

    #[test]
    fn test_empty_grid_is_straight_line() {
        // With nothing in the way the taut path is the single segment
        // start-goal, at Euclidean length.
        let env = Environment::Grid(GridEnvironment::empty(20, 20));
        let result = ThetaStarPlanner::default().solve(
            &env,
            &State::from_grid(0, 0),
            &State::from_grid(12, 19),
        );
        assert!(result.path.success);
        let direct = (12.0f64 * 12.0 + 19.0 * 19.0).sqrt();
        assert!((result.path.length - direct).abs() < 1e-6);
    }

    #[test]
    fn test_occupied_start_fails() {
        let mut grid = GridEnvironment::empty(5, 5);
        grid.set_occupied(2, 2, true);
        let env = Environment::Grid(grid);
        let result = ThetaStarPlanner::default().solve(
            &env,
            &State::from_grid(2, 2),
            &State::from_grid(4, 4),
        );
        assert!(!result.path.success);
    }
}
