//! Core state and path types shared by all planners

use itertools::Itertools;

/// Discrete grid coordinate, (row, column) indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub row: i32,
    pub col: i32,
}

impl GridCoord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// A planning state: continuous 2D coordinates, an optional heading
/// angle for orientation-aware planning, and an optional discrete grid
/// coordinate.
///
/// When `grid` is present it is authoritative for grid-based validity
/// and collision checks; the continuous coordinates are always present
/// and used for distance computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub x: f64,
    pub y: f64,
    pub heading: Option<f64>,
    pub grid: Option<GridCoord>,
}

impl State {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, heading: None, grid: None }
    }

    pub fn with_heading(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading: Some(heading), grid: None }
    }

    /// Build a grid state; the continuous coordinates mirror the cell
    /// (x = column, y = row).
    pub fn from_grid(row: i32, col: i32) -> Self {
        Self {
            x: col as f64,
            y: row as f64,
            heading: None,
            grid: Some(GridCoord::new(row, col)),
        }
    }

    /// The grid-side of the grid/continuous conversion boundary.
    ///
    /// Returns the discrete coordinate when present, otherwise
    /// truncates the continuous coordinates (row from y, column
    /// from x).
    pub fn to_grid(&self) -> GridCoord {
        match self.grid {
            Some(g) => g,
            None => GridCoord::new(self.y as i32, self.x as i32),
        }
    }

    /// Euclidean distance between the continuous coordinates.
    pub fn distance(&self, other: &State) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for State {
    fn from(t: (f64, f64)) -> Self {
        Self::new(t.0, t.1)
    }
}

/// An ordered start-to-goal sequence of states with a success flag and
/// a cached Euclidean length.
#[derive(Debug, Clone, Default)]
pub struct Path {
    pub states: Vec<State>,
    pub success: bool,
    pub length: f64,
}

impl Path {
    /// A failed, empty path. Every planner returns this instead of an
    /// error when the query is infeasible or the budget runs out.
    pub fn failure() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Recompute `length` as the sum of Euclidean distances between
    /// consecutive states. Fewer than two states gives length 0.
    pub fn compute_length(&mut self) {
        self.length = self
            .states
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.distance(b))
            .sum();
    }
}
