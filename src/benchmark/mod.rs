//! Benchmark harness
//!
//! A JSON config describes a list of experiments: an environment, a
//! planner with its parameters, a start/goal query, and a repeat
//! count. The engine runs each experiment, collects per-run metrics,
//! and aggregates them into mean / standard deviation / 95% confidence
//! summaries. Sampling-based planners get a distinct seed per repeat
//! so the statistics cover sampling variance rather than timing noise
//! alone.

pub mod statistics;

use std::time::Instant;

use log::info;
use serde::{Deserialize, Serialize};

use crate::common::{Error, Planner, Result, State};
use crate::environment::{
    Bounds, ContinuousEnvironment, Environment, MapGenerator, MapGeneratorParams, MapKind,
};
use crate::geometry::Polygon;
use crate::metrics::MetricsCollector;
use crate::planners::{
    AStarPlanner, DijkstraPlanner, Heuristic, InformedRrtStarPlanner, LazyPrmPlanner, PrmConfig,
    PrmPlanner, RrtConfig, RrtPlanner, RrtStarConfig, RrtStarPlanner, ThetaStarPlanner,
};

#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkConfig {
    pub experiments: Vec<ExperimentConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperimentConfig {
    pub name: String,
    pub planner: String,
    pub environment: EnvironmentConfig,
    /// Query endpoints as [x, y].
    pub start: [f64; 2],
    pub goal: [f64; 2],
    #[serde(default = "default_repeats")]
    pub repeats: usize,
    #[serde(default)]
    pub params: PlannerParams,
}

fn default_repeats() -> usize {
    30
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnvironmentConfig {
    Grid {
        width: usize,
        height: usize,
        #[serde(default)]
        obstacle_density: f64,
        #[serde(default)]
        seed: u64,
        #[serde(default)]
        kind: MapKind,
    },
    Continuous {
        bounds: Bounds,
        /// Obstacle polygons as vertex lists of [x, y] pairs.
        #[serde(default)]
        obstacles: Vec<Vec<[f64; 2]>>,
    },
}

impl EnvironmentConfig {
    pub fn build(&self) -> Result<Environment> {
        match self {
            EnvironmentConfig::Grid { width, height, obstacle_density, seed, kind } => {
                let params = MapGeneratorParams {
                    width: *width,
                    height: *height,
                    obstacle_density: *obstacle_density,
                    seed: *seed,
                    kind: *kind,
                };
                Ok(Environment::Grid(MapGenerator::new(*seed).generate(&params)))
            }
            EnvironmentConfig::Continuous { bounds, obstacles } => {
                if !bounds.is_ordered() {
                    return Err(Error::InvalidEnvironment(format!(
                        "inverted bounds: x [{}, {}], y [{}, {}]",
                        bounds.x_min, bounds.x_max, bounds.y_min, bounds.y_max
                    )));
                }
                let mut polygons = Vec::with_capacity(obstacles.len());
                for (i, vertices) in obstacles.iter().enumerate() {
                    if vertices.len() < 3 {
                        return Err(Error::InvalidEnvironment(format!(
                            "obstacle {} has {} vertices, need at least 3",
                            i,
                            vertices.len()
                        )));
                    }
                    let xy: Vec<(f64, f64)> = vertices.iter().map(|v| (v[0], v[1])).collect();
                    polygons.push(Polygon::from_xy(&xy));
                }
                Ok(Environment::Continuous(ContinuousEnvironment::new(*bounds, polygons)))
            }
        }
    }
}

/// Optional planner parameters; anything unset falls back to the
/// planner's defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlannerParams {
    pub heuristic: Option<Heuristic>,
    pub weight: Option<f64>,
    pub num_samples: Option<usize>,
    pub k_neighbors: Option<usize>,
    pub step_size: Option<f64>,
    pub goal_bias: Option<f64>,
    pub max_iter: Option<usize>,
    pub rewiring_radius_factor: Option<f64>,
    pub seed: Option<u64>,
}

impl PlannerParams {
    fn prm_config(&self) -> PrmConfig {
        let d = PrmConfig::default();
        PrmConfig {
            num_samples: self.num_samples.unwrap_or(d.num_samples),
            k_neighbors: self.k_neighbors.unwrap_or(d.k_neighbors),
            seed: self.seed.unwrap_or(d.seed),
        }
    }

    fn rrt_config(&self) -> RrtConfig {
        let d = RrtConfig::default();
        RrtConfig {
            step_size: self.step_size.unwrap_or(d.step_size),
            goal_bias: self.goal_bias.unwrap_or(d.goal_bias),
            max_iter: self.max_iter.unwrap_or(d.max_iter),
            seed: self.seed.unwrap_or(d.seed),
        }
    }

    fn rrt_star_config(&self) -> RrtStarConfig {
        let d = RrtStarConfig::default();
        RrtStarConfig {
            step_size: self.step_size.unwrap_or(d.step_size),
            goal_bias: self.goal_bias.unwrap_or(d.goal_bias),
            max_iter: self.max_iter.unwrap_or(d.max_iter),
            rewiring_radius_factor: self
                .rewiring_radius_factor
                .unwrap_or(d.rewiring_radius_factor),
            seed: self.seed.unwrap_or(d.seed),
        }
    }
}

/// Instantiate a planner by its config name.
pub fn create_planner(name: &str, params: &PlannerParams) -> Result<Box<dyn Planner>> {
    let heuristic = params.heuristic.unwrap_or_default();
    match name {
        "dijkstra" => Ok(Box::new(DijkstraPlanner::new())),
        "astar" => Ok(Box::new(AStarPlanner::new(heuristic))),
        "weighted_astar" => {
            Ok(Box::new(AStarPlanner::weighted(heuristic, params.weight.unwrap_or(1.5))))
        }
        "theta_star" => Ok(Box::new(ThetaStarPlanner::new(heuristic))),
        "prm" => Ok(Box::new(PrmPlanner::new(params.prm_config()))),
        "lazy_prm" => Ok(Box::new(LazyPrmPlanner::new(params.prm_config()))),
        "rrt" => Ok(Box::new(RrtPlanner::new(params.rrt_config()))),
        "rrt_star" => Ok(Box::new(RrtStarPlanner::new(params.rrt_star_config()))),
        "informed_rrt_star" => {
            Ok(Box::new(InformedRrtStarPlanner::new(params.rrt_star_config())))
        }
        other => Err(Error::UnknownPlanner(other.to_string())),
    }
}

fn is_sampling_planner(name: &str) -> bool {
    matches!(name, "prm" | "lazy_prm" | "rrt" | "rrt_star" | "informed_rrt_star")
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SummaryStat {
    pub mean: f64,
    pub std_dev: f64,
    pub ci95: f64,
}

impl SummaryStat {
    fn from_values(values: &[f64]) -> Self {
        Self {
            mean: statistics::mean(values),
            std_dev: statistics::std_dev(values),
            ci95: statistics::confidence_interval_95(values),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperimentSummary {
    pub name: String,
    pub planner: String,
    pub repeats: usize,
    pub success_rate: f64,
    /// Aggregated over successful runs only.
    pub path_length: SummaryStat,
    pub computation_time_ms: SummaryStat,
    pub nodes_expanded: SummaryStat,
}

#[derive(Debug)]
pub struct BenchmarkEngine {
    config: BenchmarkConfig,
}

impl BenchmarkEngine {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    pub fn run(&self) -> Result<Vec<ExperimentSummary>> {
        self.config.experiments.iter().map(|exp| self.run_experiment(exp)).collect()
    }

    fn run_experiment(&self, exp: &ExperimentConfig) -> Result<ExperimentSummary> {
        let env = exp.environment.build()?;
        let start = State::new(exp.start[0], exp.start[1]);
        let goal = State::new(exp.goal[0], exp.goal[1]);
        let collector = MetricsCollector::new();
        info!("experiment '{}': {} x {} repeats", exp.name, exp.planner, exp.repeats);

        let base_seed = exp.params.seed.unwrap_or(42);
        let mut lengths = Vec::new();
        let mut times = Vec::new();
        let mut expansions = Vec::new();
        let mut successes = 0usize;

        for i in 0..exp.repeats {
            // Deterministic planners repeat identically; the sampling
            // family gets a fresh seed each run.
            let mut params = exp.params.clone();
            if is_sampling_planner(&exp.planner) {
                params.seed = Some(base_seed.wrapping_add(i as u64));
            }
            let planner = create_planner(&exp.planner, &params)?;

            let t0 = Instant::now();
            let result = planner.solve(&env, &start, &goal);
            let m = collector.collect(&result.path, t0.elapsed(), result.nodes_expanded, Some(&env));

            times.push(m.computation_time_ms);
            expansions.push(m.nodes_expanded as f64);
            if m.success {
                successes += 1;
                lengths.push(m.path_length);
            }
        }

        let success_rate = if exp.repeats == 0 {
            0.0
        } else {
            successes as f64 / exp.repeats as f64
        };
        info!(
            "experiment '{}': success rate {:.2}, mean length {:.3}",
            exp.name,
            success_rate,
            statistics::mean(&lengths)
        );

        Ok(ExperimentSummary {
            name: exp.name.clone(),
            planner: exp.planner.clone(),
            repeats: exp.repeats,
            success_rate,
            path_length: SummaryStat::from_values(&lengths),
            computation_time_ms: SummaryStat::from_values(&times),
            nodes_expanded: SummaryStat::from_values(&expansions),
        })
    }
}
