//! Shortest-path search over the occupancy grid
//!
//! Best-first search keyed by accumulated cost alone; optimal on the
//! nonnegative 8-connected edge costs. Stale queue entries are
//! discarded lazily at pop time.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use log::debug;
use ordered_float::OrderedFloat;

use crate::common::{GridCoord, Planner, PlanningResult, State};
use crate::environment::Environment;
use crate::planners::{reconstruct_grid_path, NEIGHBORS_8};

#[derive(Debug, Default)]
pub struct DijkstraPlanner;

impl DijkstraPlanner {
    pub fn new() -> Self {
        Self
    }
}

impl Planner for DijkstraPlanner {
    fn solve(&self, env: &Environment, start: &State, goal: &State) -> PlanningResult {
        let Some(grid) = env.as_grid() else {
            debug!("dijkstra: non-grid environment");
            return PlanningResult::failure();
        };
        let s = start.to_grid();
        let g = goal.to_grid();
        if grid.occupied(s.row, s.col) || grid.occupied(g.row, g.col) {
            debug!("dijkstra: start or goal occupied");
            return PlanningResult::failure();
        }

        let mut heap = BinaryHeap::new();
        let mut best: HashMap<GridCoord, f64> = HashMap::new();
        let mut parent: HashMap<GridCoord, GridCoord> = HashMap::new();
        best.insert(s, 0.0);
        heap.push(Reverse((OrderedFloat(0.0), s)));

        let mut expanded = 0usize;
        while let Some(Reverse((OrderedFloat(cost), cell))) = heap.pop() {
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
                heap.push(Reverse((OrderedFloat(next_cost), next)));
            }
        }

        debug!("dijkstra: frontier exhausted after {} expansions", expanded);
        PlanningResult { path: crate::common::Path::failure(), nodes_expanded: expanded }
    }

    fn name(&self) -> &'static str {
        "dijkstra"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::GridEnvironment;

    #[test]
    fn test_empty_grid_diagonal() {
        let env = Environment::Grid(GridEnvironment::empty(10, 10));
        let result =
            DijkstraPlanner::new().solve(&env, &State::from_grid(0, 0), &State::from_grid(9, 9));
        assert!(result.path.success);
        assert!(result.path.states.len() >= 2);
        assert!((result.path.length - 9.0 * std::f64::consts::SQRT_2).abs() < 1.0);
        assert!(result.nodes_expanded > 0);
    }

    #[test]
    fn test_wall_detour() {
        let mut grid = GridEnvironment::empty(10, 10);
        for c in 1..9 {
            grid.set_occupied(5, c, true);
        }
        let env = Environment::Grid(grid);
        let result =
            DijkstraPlanner::new().solve(&env, &State::from_grid(0, 0), &State::from_grid(9, 9));
        assert!(result.path.success);
        assert!(result.path.length > 12.0);
    }

    #[test]
    fn test_occupied_goal_fails_without_search() {
        let mut grid = GridEnvironment::empty(5, 5);
        grid.set_occupied(4, 4, true);
        let env = Environment::Grid(grid);
        let result =
            DijkstraPlanner::new().solve(&env, &State::from_grid(0, 0), &State::from_grid(4, 4));
        assert!(!result.path.success);
        assert_eq!(result.nodes_expanded, 0);
    }

    #[test]
    fn test_unreachable_goal() {
        let mut grid = GridEnvironment::empty(5, 5);
        for r in 0..5 {
            grid.set_occupied(r, 2, true);
        }
        let env = Environment::Grid(grid);
        let result =
            DijkstraPlanner::new().solve(&env, &State::from_grid(0, 0), &State::from_grid(0, 4));
        assert!(!result.path.success);
        assert!(result.nodes_expanded > 0);
    }

    #[test]
    fn test_rejects_continuous_environment() {
        use crate::environment::{Bounds, ContinuousEnvironment};
        let env = Environment::Continuous(ContinuousEnvironment::new(
            Bounds::new(0.0, 1.0, 0.0, 1.0),
            Vec::new(),
        ));
        let result =
            DijkstraPlanner::new().solve(&env, &State::new(0.0, 0.0), &State::new(1.0, 1.0));
        assert!(!result.path.success);
    }

    #[test]
    fn test_path_endpoints() {
        let env = Environment::Grid(GridEnvironment::empty(6, 6));
        let result =
            DijkstraPlanner::new().solve(&env, &State::from_grid(1, 2), &State::from_grid(4, 5));
        assert!(result.path.success);
        assert_eq!(result.path.states[0], State::from_grid(1, 2));
        assert_eq!(*result.path.states.last().unwrap(), State::from_grid(4, 5));
    }
}
