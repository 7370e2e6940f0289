//! Probabilistic roadmap
//!
//! Samples a fixed quota of valid configurations, wires each to its k
//! nearest neighbors through the spatial index, validates every edge
//! up front, then runs a shortest-path query over the roadmap. The
//! start and goal occupy the first two roadmap slots so queries are
//! just a graph search between fixed indices.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use log::debug;
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{Path, Planner, PlanningResult, State};
use crate::environment::{Bounds, Environment};
use crate::geometry::{KdTree2d, Point2};

pub(crate) const START_IDX: usize = 0;
pub(crate) const GOAL_IDX: usize = 1;

#[derive(Debug, Clone)]
pub struct PrmConfig {
    pub num_samples: usize,
    pub k_neighbors: usize,
    pub seed: u64,
}

impl Default for PrmConfig {
    fn default() -> Self {
        Self { num_samples: 500, k_neighbors: 10, seed: 42 }
    }
}

/// Start, goal, then up to `num_samples` valid samples. Sampling gives
/// up after ten times the quota in attempts, so heavily blocked
/// workspaces yield a sparser roadmap instead of looping forever.
pub(crate) fn sample_roadmap(
    env: &Environment,
    bounds: &Bounds,
    start: &State,
    goal: &State,
    num_samples: usize,
    seed: u64,
) -> Vec<Point2> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(num_samples + 2);
    points.push(Point2::new(start.x, start.y));
    points.push(Point2::new(goal.x, goal.y));

    let max_attempts = num_samples.saturating_mul(10);
    let mut attempts = 0usize;
    while points.len() < num_samples + 2 && attempts < max_attempts {
        attempts += 1;
        let x = rng.gen_range(bounds.x_min..=bounds.x_max);
        let y = rng.gen_range(bounds.y_min..=bounds.y_max);
        if env.is_valid(&State::new(x, y)) {
            points.push(Point2::new(x, y));
        }
    }
    points
}

/// k-nearest-neighbor adjacency over the point set. `keep_edge`
/// decides whether a candidate edge enters the roadmap; edges are
/// undirected and considered once per unordered pair.
pub(crate) fn build_adjacency(
    points: &[Point2],
    k: usize,
    mut keep_edge: impl FnMut(usize, usize) -> bool,
) -> Vec<Vec<(usize, f64)>> {
    let tree = KdTree2d::build(points.to_vec());
    let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); points.len()];
    let mut seen: HashSet<(usize, usize)> = HashSet::new();

    for i in 0..points.len() {
        // k + 1 because the query point is its own nearest neighbor.
        for j in tree.k_nearest(&points[i], k + 1) {
            if j == i {
                continue;
            }
            let key = (i.min(j), i.max(j));
            if !seen.insert(key) {
                continue;
            }
            if !keep_edge(i, j) {
                continue;
            }
            let d = (points[i] - points[j]).norm();
            adjacency[i].push((j, d));
            adjacency[j].push((i, d));
        }
    }
    adjacency
}

/// Dijkstra from the start slot to the goal slot. `edge_free` is
/// consulted at relaxation time, which lets the lazy variant defer
/// collision checks to here. Returns the node index path (when one
/// exists) and the number of settled nodes.
pub(crate) fn roadmap_search(
    adjacency: &[Vec<(usize, f64)>],
    mut edge_free: impl FnMut(usize, usize) -> bool,
) -> (Option<Vec<usize>>, usize) {
    let n = adjacency.len();
    let mut best = vec![f64::INFINITY; n];
    let mut parent = vec![usize::MAX; n];
    let mut heap = BinaryHeap::new();
    best[START_IDX] = 0.0;
    heap.push(Reverse((OrderedFloat(0.0), START_IDX)));

    let mut expanded = 0usize;
    while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
        if cost > best[node] + 1e-9 {
            continue;
        }
        expanded += 1;

        if node == GOAL_IDX {
            let mut trace = vec![node];
            let mut cur = node;
            while cur != START_IDX {
                cur = parent[cur];
                trace.push(cur);
            }
            trace.reverse();
            return (Some(trace), expanded);
        }

        for &(next, d) in &adjacency[node] {
            let next_cost = cost + d;
            if next_cost >= best[next] {
                continue;
            }
            if !edge_free(node, next) {
                continue;
            }
            best[next] = next_cost;
            parent[next] = node;
            heap.push(Reverse((OrderedFloat(next_cost), next)));
        }
    }
    (None, expanded)
}

pub(crate) fn roadmap_path(points: &[Point2], trace: &[usize]) -> Path {
    let states: Vec<State> =
        trace.iter().map(|&i| State::new(points[i].x, points[i].y)).collect();
    let mut path = Path { states, success: true, length: 0.0 };
    path.compute_length();
    path
}

#[derive(Debug, Clone, Default)]
pub struct PrmPlanner {
    config: PrmConfig,
}

impl PrmPlanner {
    pub fn new(config: PrmConfig) -> Self {
        Self { config }
    }
}

impl Planner for PrmPlanner {
    fn solve(&self, env: &Environment, start: &State, goal: &State) -> PlanningResult {
        let Some(bounds) = env.bounds() else {
            debug!("prm: environment has no workspace bounds");
            return PlanningResult::failure();
        };
        if !env.is_valid(start) || !env.is_valid(goal) {
            debug!("prm: start or goal invalid");
            return PlanningResult::failure();
        }

        let points =
            sample_roadmap(env, &bounds, start, goal, self.config.num_samples, self.config.seed);
        // Eager construction: every candidate edge is collision-checked
        // before it enters the roadmap.
        let adjacency = build_adjacency(&points, self.config.k_neighbors, |i, j| {
            env.collision_free(
                &State::new(points[i].x, points[i].y),
                &State::new(points[j].x, points[j].y),
            )
        });

        let (trace, expanded) = roadmap_search(&adjacency, |_, _| true);
        match trace {
            Some(trace) => PlanningResult {
                path: roadmap_path(&points, &trace),
                nodes_expanded: expanded,
            },
            None => {
                debug!("prm: roadmap disconnected, {} nodes settled", expanded);
                PlanningResult { path: Path::failure(), nodes_expanded: expanded }
            }
        }
    }

    fn name(&self) -> &'static str {
        "prm"
    }
}
