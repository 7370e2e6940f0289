//! Grid distance heuristics
//!
//! Euclidean and Diagonal (octile) are admissible and consistent for
//! the 8-connected cost structure (axis moves cost 1, diagonals √2).
//! Manhattan can overestimate diagonal-heavy paths on an 8-connected
//! grid; it is exact on 4-connected grids and kept for comparison.

use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};

use crate::common::GridCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    Manhattan,
    Euclidean,
    Diagonal,
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::Diagonal
    }
}

impl Heuristic {
    /// Estimated cost of moving from `a` to `b`.
    pub fn estimate(self, a: GridCoord, b: GridCoord) -> f64 {
        let dr = (b.row - a.row).abs();
        let dc = (b.col - a.col).abs();
        match self {
            Heuristic::Manhattan => (dr + dc) as f64,
            Heuristic::Euclidean => ((dr * dr + dc * dc) as f64).sqrt(),
            Heuristic::Diagonal => {
                dr.max(dc) as f64 + (SQRT_2 - 1.0) * dr.min(dc) as f64
            }
        }
    }
}
