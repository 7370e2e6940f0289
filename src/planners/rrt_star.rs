//! Asymptotically-optimal rapidly-exploring random tree
//!
//! RRT* extends RRT with parent selection and rewiring inside a
//! shrinking neighbor radius, and keeps searching after the first goal
//! connection: the best connection found within the iteration budget
//! is returned.

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::common::{Path, Planner, PlanningResult, State};
use crate::environment::Environment;
use crate::geometry::Point2;
use crate::planners::rrt::{sample_target, steer, trace_to_root};

#[derive(Debug, Clone)]
pub struct RrtStarConfig {
    pub step_size: f64,
    pub goal_bias: f64,
    pub max_iter: usize,
    /// γ in the shrinking-radius schedule γ·(ln n / n)^½.
    pub rewiring_radius_factor: f64,
    pub seed: u64,
}

impl Default for RrtStarConfig {
    fn default() -> Self {
        Self {
            step_size: 1.0,
            goal_bias: 0.1,
            max_iter: 5000,
            rewiring_radius_factor: 10.0,
            seed: 42,
        }
    }
}

/// Shrinking rewiring radius, capped at twice the step size.
fn rewiring_radius(n: usize, gamma: f64, step_size: f64) -> f64 {
    if n <= 1 {
        return step_size * 2.0;
    }
    let n = n as f64;
    (gamma * (n.ln() / n).sqrt()).min(step_size * 2.0)
}

/// Shared tree growth for RRT* and its informed variant.
/// `on_improvement` fires whenever a strictly better goal-connection
/// cost is found, with the iteration index and the new best cost.
pub(crate) fn grow(
    env: &Environment,
    start: &State,
    goal: &State,
    config: &RrtStarConfig,
    mut on_improvement: impl FnMut(usize, f64),
) -> PlanningResult {
    let Some(bounds) = env.bounds() else {
        debug!("rrt_star: environment has no workspace bounds");
        return PlanningResult::failure();
    };

    let goal_pt = Point2::new(goal.x, goal.y);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut tree = vec![Point2::new(start.x, start.y)];
    let mut parent = vec![0usize];
    let mut cost = vec![0.0f64];
    let goal_thresh = config.step_size * 1.5;

    let mut best_cost = f64::INFINITY;
    let mut best_goal_idx: Option<usize> = None;

    for iter in 0..config.max_iter {
        let target = sample_target(&mut rng, &bounds, &goal_pt, config.goal_bias);

        let nearest = tree
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = (*a - target).norm_squared();
                let db = (*b - target).norm_squared();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
            .unwrap_or(0);

        let new_pt = steer(&tree[nearest], &target, config.step_size);
        let new_state = State::new(new_pt.x, new_pt.y);
        let near_state = State::new(tree[nearest].x, tree[nearest].y);
        if !env.collision_free(&near_state, &new_state) || !env.is_valid(&new_state) {
            continue;
        }

        // Choose the parent minimizing path cost among all nodes in
        // the rewiring radius, not just the nearest.
        let radius = rewiring_radius(tree.len(), config.rewiring_radius_factor, config.step_size);
        let mut best_parent = nearest;
        let mut c_min = cost[nearest] + (new_pt - tree[nearest]).norm();
        for (i, pt) in tree.iter().enumerate() {
            let d = (new_pt - pt).norm();
            if d > radius {
                continue;
            }
            let candidate = cost[i] + d;
            if candidate < c_min
                && env.collision_free(&State::new(pt.x, pt.y), &new_state)
            {
                c_min = candidate;
                best_parent = i;
            }
        }

        tree.push(new_pt);
        parent.push(best_parent);
        cost.push(c_min);
        let new_idx = tree.len() - 1;

        // Rewire existing neighbors through the new node when that
        // strictly reduces their cost, then push the saving down their
        // subtrees.
        for i in 0..new_idx {
            let d = (new_pt - tree[i]).norm();
            if d > radius {
                continue;
            }
            let rerouted = cost[new_idx] + d;
            if rerouted < cost[i]
                && env.collision_free(&State::new(tree[i].x, tree[i].y), &new_state)
            {
                parent[i] = new_idx;
                cost[i] = rerouted;
                let mut stack = vec![i];
                while let Some(u) = stack.pop() {
                    for j in 0..tree.len() {
                        if j != u && parent[j] == u && j != new_idx {
                            cost[j] = cost[u] + (tree[j] - tree[u]).norm();
                            stack.push(j);
                        }
                    }
                }
            }
        }

        // Goal connection is attempted on every accepted node; the
        // planner does not stop at the first success.
        let to_goal = (goal_pt - new_pt).norm();
        if to_goal < goal_thresh && env.collision_free(&new_state, goal) {
            let c_goal = cost[new_idx] + to_goal;
            if c_goal < best_cost {
                best_cost = c_goal;
                best_goal_idx = Some(new_idx);
                on_improvement(iter, c_goal);
            }
        }
    }

    let Some(goal_idx) = best_goal_idx else {
        debug!("rrt_star: no goal connection within budget, tree size {}", tree.len());
        return PlanningResult { path: Path::failure(), nodes_expanded: tree.len() };
    };

    let trace = trace_to_root(&parent, goal_idx);
    let mut states: Vec<State> =
        trace.iter().map(|&i| State::new(tree[i].x, tree[i].y)).collect();
    states.push(State::new(goal.x, goal.y));
    let mut path = Path { states, success: true, length: 0.0 };
    path.compute_length();
    PlanningResult { path, nodes_expanded: tree.len() }
}

#[derive(Debug, Clone, Default)]
pub struct RrtStarPlanner {
    config: RrtStarConfig,
}

impl RrtStarPlanner {
    pub fn new(config: RrtStarConfig) -> Self {
        Self { config }
    }
}

impl Planner for RrtStarPlanner {
    fn solve(&self, env: &Environment, start: &State, goal: &State) -> PlanningResult {
        grow(env, start, goal, &self.config, |_, _| {})
    }

    fn name(&self) -> &'static str {
        "rrt_star"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{Bounds, ContinuousEnvironment, GridEnvironment};
    use crate::planners::RrtPlanner;

    fn empty_workspace() -> Environment {
        Environment::Continuous(ContinuousEnvironment::new(
            Bounds::new(0.0, 10.0, 0.0, 10.0),
            Vec::new(),
        ))
    }

    #[test]
    fn test_radius_shrinks() {
        let r10 = rewiring_radius(10, 10.0, 1.0);
        let r1000 = rewiring_radius(1000, 10.0, 1.0);
        assert!(r1000 < r10 || (r10 - 2.0).abs() < 1e-12);
        assert!(rewiring_radius(5, 10.0, 1.0) <= 2.0);
    }

    #[test]
    fn test_succeeds_and_runs_full_budget() {
        let env = empty_workspace();
        let config = RrtStarConfig { max_iter: 2000, ..Default::default() };
        let result =
            RrtStarPlanner::new(config).solve(&env, &State::new(1.0, 1.0), &State::new(9.0, 9.0));
        assert!(result.path.success);
        assert!(result.path.length > 0.0);
    }

    #[test]
    fn test_not_worse_than_rrt_in_open_space() {
        // With rewiring and full-budget search the returned path
        // should be close to the straight-line optimum.
        let env = empty_workspace();
        let start = State::new(1.0, 1.0);
        let goal = State::new(9.0, 9.0);
        let optimal = start.distance(&goal);

        let star = RrtStarPlanner::default().solve(&env, &start, &goal);
        let plain = RrtPlanner::default().solve(&env, &start, &goal);
        assert!(star.path.success);
        assert!(plain.path.success);
        assert!(star.path.length <= plain.path.length + 1e-9);
        assert!(star.path.length < optimal * 1.3);
    }

    #[test]
    fn test_fails_without_bounds() {
        let env = Environment::Grid(GridEnvironment::empty(10, 10));
        let result =
            RrtStarPlanner::default().solve(&env, &State::new(0.0, 0.0), &State::new(9.0, 9.0));
        assert!(!result.path.success);
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let env = empty_workspace();
        let planner = RrtStarPlanner::default();
        let a = planner.solve(&env, &State::new(1.0, 1.0), &State::new(9.0, 9.0));
        let b = planner.solve(&env, &State::new(1.0, 1.0), &State::new(9.0, 9.0));
        assert_eq!(a.path.states, b.path.states);
        assert!((a.path.length - b.path.length).abs() < 1e-12);
    }
}
