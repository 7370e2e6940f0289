//! Heuristic-guided search over the occupancy grid
//!
//! A* keyed by accumulated cost plus a (optionally inflated) heuristic
//! estimate. With an admissible heuristic and weight 1.0 the result is
//! optimal; a weight above 1.0 trades optimality for fewer expansions.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use log::debug;
use ordered_float::OrderedFloat;

use crate::common::{GridCoord, Path, Planner, PlanningResult, State};
use crate::environment::Environment;
use crate::planners::{reconstruct_grid_path, Heuristic, NEIGHBORS_8};

#[derive(Debug, Clone)]
pub struct AStarPlanner {
    heuristic: Heuristic,
    weight: f64,
}

impl AStarPlanner {
    pub fn new(heuristic: Heuristic) -> Self {
        Self { heuristic, weight: 1.0 }
    }

    /// Weighted variant: the heuristic is multiplied by `weight`
    /// (conventionally 1.5). Not guaranteed optimal for weight > 1.
    pub fn weighted(heuristic: Heuristic, weight: f64) -> Self {
        Self { heuristic, weight }
    }
}

impl Default for AStarPlanner {
    fn default() -> Self {
        Self::new(Heuristic::default())
    }
}

impl Planner for AStarPlanner {
    fn solve(&self, env: &Environment, start: &State, goal: &State) -> PlanningResult {
        let Some(grid) = env.as_grid() else {
            debug!("astar: non-grid environment");
            return PlanningResult::failure();
        };
        let s = start.to_grid();
        let g = goal.to_grid();
        if grid.occupied(s.row, s.col) || grid.occupied(g.row, g.col) {
            debug!("astar: start or goal occupied");
            return PlanningResult::failure();
        }

        let h = |cell: GridCoord| self.weight * self.heuristic.estimate(cell, g);

        // Heap entries carry (f, g, cell); g makes the stale check a
        // direct comparison against the best-known cost.
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

            for &(dr, dc, step) in &NEIGHBORS_8 {
                let next = GridCoord::new(cell.row + dr, cell.col + dc);
                if grid.occupied(next.row, next.col) {
                    continue;
                }
                let from = State::from_grid(cell.row, cell.col);
                let to = State::from_grid(next.row, next.col);
                if !env.collision_free(&from, &to) {
                    continue;
                }
                let next_cost = cost + step;
                if best.get(&next).is_some_and(|&c| c <= next_cost) {
                    continue;
                }
                best.insert(next, next_cost);
                parent.insert(next, cell);
                heap.push(Reverse((
                    OrderedFloat(next_cost + h(next)),
                    OrderedFloat(next_cost),
                    next,
                )));
            }
        }

        debug!("astar: frontier exhausted after {} expansions", expanded);
        PlanningResult { path: Path::failure(), nodes_expanded: expanded }
    }

    fn name(&self) -> &'static str {
        if self.weight > 1.0 {
            "weighted_astar"
        } else {
            "astar"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::GridEnvironment;
    use crate::planners::DijkstraPlanner;

    #[test]
    fn test_empty_grid_diagonal() {
        let env = Environment::Grid(GridEnvironment::empty(10, 10));
        let planner = AStarPlanner::new(Heuristic::Diagonal);
        let result = planner.solve(&env, &State::from_grid(0, 0), &State::from_grid(9, 9));
        assert!(result.path.success);
        assert!((result.path.length - 9.0 * std::f64::consts::SQRT_2).abs() < 1.0);
    }

    #[test]
    fn test_never_expands_more_than_dijkstra() {
        let mut grid = GridEnvironment::empty(20, 20);
        for c in 3..17 {
            grid.set_occupied(10, c, true);
        }
        let env = Environment::Grid(grid);
        let start = State::from_grid(0, 0);
        let goal = State::from_grid(19, 19);

        let dij = DijkstraPlanner::new().solve(&env, &start, &goal);
        for h in [Heuristic::Euclidean, Heuristic::Diagonal] {
            let astar = AStarPlanner::new(h).solve(&env, &start, &goal);
            assert!(astar.path.success);
            assert!(astar.nodes_expanded <= dij.nodes_expanded);
            // Admissible heuristics keep A* optimal.
            assert!((astar.path.length - dij.path.length).abs() < 1e-6);
        }
    }

    #[test]
    fn test_admissibility_against_true_cost() {
        // True octile costs come from Dijkstra on an empty grid.
        let env = Environment::Grid(GridEnvironment::empty(12, 12));
        let planner = DijkstraPlanner::new();
        for (r, c) in [(0, 0), (3, 7), (11, 2)] {
            for (gr, gc) in [(11, 11), (5, 5), (0, 9)] {
                let result = planner.solve(
                    &env,
                    &State::from_grid(r, c),
                    &State::from_grid(gr, gc),
                );
                assert!(result.path.success);
                let a = GridCoord::new(r, c);
                let b = GridCoord::new(gr, gc);
                for h in [Heuristic::Euclidean, Heuristic::Diagonal] {
                    assert!(h.estimate(a, b) <= result.path.length + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_weighted_reduces_expansions() {
        let mut grid = GridEnvironment::empty(30, 30);
        for c in 0..25 {
            grid.set_occupied(15, c, true);
        }
        let env = Environment::Grid(grid);
        let start = State::from_grid(0, 0);
        let goal = State::from_grid(29, 29);

        let plain = AStarPlanner::new(Heuristic::Diagonal).solve(&env, &start, &goal);
        let weighted = AStarPlanner::weighted(Heuristic::Diagonal, 1.5).solve(&env, &start, &goal);
        assert!(plain.path.success);
        assert!(weighted.path.success);
        assert!(weighted.nodes_expanded <= plain.nodes_expanded);
    }

    #[test]
    fn test_planner_names() {
        assert_eq!(AStarPlanner::new(Heuristic::Diagonal).name(), "astar");
        assert_eq!(AStarPlanner::weighted(Heuristic::Diagonal, 1.5).name(), "weighted_astar");
    }

    #[test]
    fn test_occupied_start_fails() {
        let mut grid = GridEnvironment::empty(5, 5);
        grid.set_occupied(0, 0, true);
        let env = Environment::Grid(grid);
        let result = AStarPlanner::default().solve(
            &env,
            &State::from_grid(0, 0),
            &State::from_grid(4, 4),
        );
        assert!(!result.path.success);
        assert_eq!(result.nodes_expanded, 0);
    }
}
