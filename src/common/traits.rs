//! Planner interface

use crate::common::types::{Path, State};
use crate::environment::Environment;

/// Outcome of one planning call: the path (possibly failed) together
/// with the number of nodes the search actually expanded.
///
/// Returning the counter alongside the path keeps planners free of
/// hidden mutable state: `solve` takes `&self` and the environment is
/// read-only throughout.
#[derive(Debug, Clone)]
pub struct PlanningResult {
    pub path: Path,
    pub nodes_expanded: usize,
}

impl PlanningResult {
    pub fn failure() -> Self {
        Self { path: Path::failure(), nodes_expanded: 0 }
    }
}

/// A single-query, synchronous motion planner.
///
/// A solve call runs to completion (success, failure, or budget
/// exhaustion) before returning. Infeasible queries and exhausted
/// budgets produce an unsuccessful path, never a panic or error.
pub trait Planner {
    fn solve(&self, env: &Environment, start: &State, goal: &State) -> PlanningResult;

    /// Stable identifier used by the benchmark harness.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::GridEnvironment;

    struct NoopPlanner;

    impl Planner for NoopPlanner {
        fn solve(&self, _env: &Environment, _start: &State, _goal: &State) -> PlanningResult {
            PlanningResult::failure()
        }

        fn name(&self) -> &'static str {
            "noop"
        }
    }

    #[test]
    fn test_planner_object_safety() {
        let planner: Box<dyn Planner> = Box::new(NoopPlanner);
        let env = Environment::Grid(GridEnvironment::empty(3, 3));
        let result = planner.solve(&env, &State::from_grid(0, 0), &State::from_grid(2, 2));
        assert!(!result.path.success);
        assert_eq!(planner.name(), "noop");
    }
}
