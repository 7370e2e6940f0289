//! pathbench: benchmarking suite for 2D robot motion planning
//!
//! The crate has four layers. Environments describe where a robot may
//! move (occupancy grids, polygonal continuous workspaces, and an
//! orientation-augmented wrapper). Planners search them, split into a
//! graph-search family over grids (Dijkstra, A*, weighted A*, Theta*)
//! and a sampling-based family over bounded continuous workspaces
//! (PRM, Lazy PRM, RRT, RRT*, Informed RRT*). Metrics score a single
//! run, and the benchmark engine drives repeated runs from a JSON
//! config and aggregates the scores.
//!
//! ```
//! use pathbench::environment::{Environment, GridEnvironment};
//! use pathbench::planners::AStarPlanner;
//! use pathbench::{Planner, State};
//!
//! let env = Environment::Grid(GridEnvironment::empty(10, 10));
//! let result = AStarPlanner::default().solve(
//!     &env,
//!     &State::from_grid(0, 0),
//!     &State::from_grid(9, 9),
//! );
//! assert!(result.path.success);
//! ```

pub mod benchmark;
pub mod common;
pub mod environment;
pub mod geometry;
pub mod metrics;
pub mod planners;

pub use common::{Error, GridCoord, Path, Planner, PlanningResult, Result, State};
