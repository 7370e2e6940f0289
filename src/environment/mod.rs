//! Environment abstraction: occupancy grids, continuous polygon
//! workspaces, and the orientation-augmented wrapper.

pub mod continuous;
pub mod grid;
pub mod map_generator;
pub mod se2;

pub use continuous::ContinuousEnvironment;
pub use grid::GridEnvironment;
pub use map_generator::{MapGenerator, MapGeneratorParams, MapKind};
pub use se2::Se2Environment;

use serde::{Deserialize, Serialize};

use crate::common::State;

/// Axis-aligned workspace rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self { x_min, x_max, y_min, y_max }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    /// Min corner at or below the max corner on both axes. Parsed
    /// bounds failing this are rejected as invalid input.
    pub fn is_ordered(&self) -> bool {
        self.x_min <= self.x_max && self.y_min <= self.y_max
    }
}

/// The three workspace variants planners run against.
///
/// Planners that require a bounded workspace (the sampling-based
/// family) check [`bounds`](Environment::bounds) and fail fast when it
/// is absent; the grid variant deliberately reports no bounds.
#[derive(Debug, Clone)]
pub enum Environment {
    Grid(GridEnvironment),
    Continuous(ContinuousEnvironment),
    Se2(Se2Environment),
}

impl Environment {
    pub fn is_valid(&self, s: &State) -> bool {
        match self {
            Environment::Grid(g) => g.is_valid(s),
            Environment::Continuous(c) => c.is_valid(s),
            Environment::Se2(w) => w.is_valid(s),
        }
    }

    /// True iff the segment from `a` to `b`, endpoints included,
    /// touches no obstacle. A degenerate segment (`a == b`) never
    /// collides.
    pub fn collision_free(&self, a: &State, b: &State) -> bool {
        match self {
            Environment::Grid(g) => g.collision_free(a, b),
            Environment::Continuous(c) => c.collision_free(a, b),
            Environment::Se2(w) => w.collision_free(a, b),
        }
    }

    /// Minimum distance from `s` to the nearest obstacle boundary.
    pub fn clearance(&self, s: &State) -> f64 {
        match self {
            Environment::Grid(g) => g.clearance(s),
            Environment::Continuous(c) => c.clearance(s),
            Environment::Se2(w) => w.clearance(s),
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Environment::Grid(_) => None,
            Environment::Continuous(c) => Some(c.bounds()),
            Environment::Se2(w) => Some(w.bounds()),
        }
    }

    /// The underlying grid, if this is a grid environment. Used by the
    /// graph-search planners, which are defined only over grids.
    pub fn as_grid(&self) -> Option<&GridEnvironment> {
        match self {
            Environment::Grid(g) => Some(g),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_variant_has_no_bounds() {
        let env = Environment::Grid(GridEnvironment::empty(5, 5));
        assert!(env.bounds().is_none());
        assert!(env.as_grid().is_some());
    }

    #[test]
    fn test_continuous_variant_reports_bounds() {
        let env = Environment::Continuous(ContinuousEnvironment::new(
            Bounds::new(0.0, 10.0, 0.0, 10.0),
            Vec::new(),
        ));
        let b = env.bounds().unwrap();
        assert_eq!(b.x_max, 10.0);
        assert!(env.as_grid().is_none());
    }

    #[test]
    fn test_degenerate_segment_never_collides() {
        // Grid: state sitting on an occupied cell.
        let mut grid = GridEnvironment::empty(4, 4);
        grid.set_occupied(2, 2, true);
        let env = Environment::Grid(grid);
        let s = State::from_grid(2, 2);
        assert!(env.collision_free(&s, &s));

        // Continuous: state inside an obstacle polygon.
        let env = Environment::Continuous(ContinuousEnvironment::new(
            Bounds::new(0.0, 10.0, 0.0, 10.0),
            vec![crate::geometry::Polygon::from_xy(&[
                (1.0, 1.0),
                (3.0, 1.0),
                (3.0, 3.0),
                (1.0, 3.0),
            ])],
        ));
        let s = State::new(2.0, 2.0);
        assert!(env.collision_free(&s, &s));
    }
}
