//! RRT* with convergence tracking
//!
//! Runs the same tree growth as RRT* and records every improvement of
//! the best goal-connection cost as a (iteration, cost) series, for
//! studying anytime behavior over the iteration budget.

use crate::common::{Planner, PlanningResult, State};
use crate::environment::Environment;
use crate::planners::rrt_star::{grow, RrtStarConfig};

/// Best-cost improvements observed during a single run.
#[derive(Debug, Clone, Default)]
pub struct ConvergenceData {
    /// Each entry is the iteration index at which the best cost
    /// improved, paired with the new cost.
    pub cost_vs_iteration: Vec<(usize, f64)>,
    /// Cost of the returned path, infinity when no path was found.
    pub final_cost: f64,
}

#[derive(Debug, Clone, Default)]
pub struct InformedRrtStarPlanner {
    config: RrtStarConfig,
}

impl InformedRrtStarPlanner {
    pub fn new(config: RrtStarConfig) -> Self {
        Self { config }
    }

    /// Plan and return the convergence series alongside the result.
    pub fn plan_with_convergence(
        &self,
        env: &Environment,
        start: &State,
        goal: &State,
    ) -> (PlanningResult, ConvergenceData) {
        let mut data = ConvergenceData { final_cost: f64::INFINITY, ..Default::default() };
        let result = grow(env, start, goal, &self.config, |iter, cost| {
            data.cost_vs_iteration.push((iter, cost));
        });
        if result.path.success {
            data.final_cost = result.path.length;
        }
        (result, data)
    }
}

impl Planner for InformedRrtStarPlanner {
    fn solve(&self, env: &Environment, start: &State, goal: &State) -> PlanningResult {
        let (result, _) = self.plan_with_convergence(env, start, goal);
        result
    }

    fn name(&self) -> &'static str {
        "informed_rrt_star"
    }
}
