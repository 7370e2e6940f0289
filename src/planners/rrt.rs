//! Rapidly-exploring random tree
//!
//! Grows a single tree from the start with goal-biased uniform
//! sampling and bounded-step steering; terminates at the first
//! collision-free goal connection. Requires a bounded workspace.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{Path, Planner, PlanningResult, State};
use crate::environment::{Bounds, Environment};
use crate::geometry::Point2;

#[derive(Debug, Clone)]
pub struct RrtConfig {
    /// Maximum steering distance per extension.
    pub step_size: f64,
    /// Probability of sampling the goal instead of a uniform point.
    pub goal_bias: f64,
    pub max_iter: usize,
    pub seed: u64,
}

impl Default for RrtConfig {
    fn default() -> Self {
        Self { step_size: 1.0, goal_bias: 0.1, max_iter: 5000, seed: 42 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RrtPlanner {
    config: RrtConfig,
}

impl RrtPlanner {
    pub fn new(config: RrtConfig) -> Self {
        Self { config }
    }
}

pub(crate) fn sample_target(
    rng: &mut StdRng,
    bounds: &Bounds,
    goal: &Point2,
    goal_bias: f64,
) -> Point2 {
    if rng.gen_range(0.0..1.0) < goal_bias {
        *goal
    } else {
        Point2::new(
            rng.gen_range(bounds.x_min..=bounds.x_max),
            rng.gen_range(bounds.y_min..=bounds.y_max),
        )
    }
}

/// Move from `from` toward `target` by at most `step`; targets within
/// one step (or coincident) are reached exactly.
pub(crate) fn steer(from: &Point2, target: &Point2, step: f64) -> Point2 {
    let d = (target - from).norm();
    if d <= step || d < 1e-9 {
        *target
    } else {
        from + (target - from) * (step / d)
    }
}

pub(crate) fn trace_to_root(parent: &[usize], mut cur: usize) -> Vec<usize> {
    let mut trace = vec![cur];
    while cur != 0 {
        cur = parent[cur];
        trace.push(cur);
    }
    trace.reverse();
    trace
}

impl Planner for RrtPlanner {
    fn solve(&self, env: &Environment, start: &State, goal: &State) -> PlanningResult {
        let Some(bounds) = env.bounds() else {
            debug!("rrt: environment has no workspace bounds");
            return PlanningResult::failure();
        };

        let goal_pt = Point2::new(goal.x, goal.y);
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut tree = vec![Point2::new(start.x, start.y)];
        let mut parent = vec![0usize];
        let goal_thresh = self.config.step_size * 1.5;

        for _ in 0..self.config.max_iter {
            let target = sample_target(&mut rng, &bounds, &goal_pt, self.config.goal_bias);

            // Nearest node by linear scan; the tree mutates every
            // iteration, so a snapshot index would not help here.
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

            let new_pt = steer(&tree[nearest], &target, self.config.step_size);
            let from = State::new(tree[nearest].x, tree[nearest].y);
            let to = State::new(new_pt.x, new_pt.y);
            if !env.collision_free(&from, &to) || !env.is_valid(&to) {
                continue;
            }

            tree.push(new_pt);
            parent.push(nearest);

            let to_goal = (goal_pt - new_pt).norm();
            if to_goal < goal_thresh && env.collision_free(&to, goal) {
                let trace = trace_to_root(&parent, tree.len() - 1);
                let mut states: Vec<State> =
                    trace.iter().map(|&i| State::new(tree[i].x, tree[i].y)).collect();
                states.push(State::new(goal.x, goal.y));
                let mut path = Path { states, success: true, length: 0.0 };
                path.compute_length();
                return PlanningResult { path, nodes_expanded: tree.len() };
            }
        }

        debug!("rrt: iteration budget spent, tree size {}", tree.len());
        PlanningResult { path: Path::failure(), nodes_expanded: tree.len() }
    }

    fn name(&self) -> &'static str {
        "rrt"
    }
}
