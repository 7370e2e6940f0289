//! Discrete occupancy-grid environment

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::common::{Error, GridCoord, Result, State};
use crate::geometry::collision::NO_OBSTACLE_CLEARANCE;

/// Serialized form: integer dimensions plus a row-major occupancy
/// array, 0 = free and nonzero = occupied.
#[derive(Debug, Serialize, Deserialize)]
struct GridMapData {
    width: usize,
    height: usize,
    occupancy: Vec<Vec<i32>>,
}

/// 2D occupancy grid, (row, column) indexed. Out-of-bounds cells are
/// treated as occupied. Reports no workspace bounds: sampling-based
/// planners reject this variant.
#[derive(Debug, Clone)]
pub struct GridEnvironment {
    width: usize,
    height: usize,
    occupancy: DMatrix<i32>,
}

impl GridEnvironment {
    /// All-free grid of the given dimensions.
    pub fn empty(width: usize, height: usize) -> Self {
        Self { width, height, occupancy: DMatrix::zeros(height, width) }
    }

    /// Build from row-major occupancy values; every row must have
    /// length `width` and there must be `height` rows.
    pub fn new(width: usize, height: usize, occupancy: Vec<Vec<i32>>) -> Result<Self> {
        if occupancy.len() != height {
            return Err(Error::InvalidEnvironment(format!(
                "occupancy has {} rows, expected {}",
                occupancy.len(),
                height
            )));
        }
        for (r, row) in occupancy.iter().enumerate() {
            if row.len() != width {
                return Err(Error::InvalidEnvironment(format!(
                    "occupancy row {} has width {}, expected {}",
                    r,
                    row.len(),
                    width
                )));
            }
        }
        let occupancy = DMatrix::from_fn(height, width, |r, c| occupancy[r][c]);
        Ok(Self { width, height, occupancy })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn occupied(&self, row: i32, col: i32) -> bool {
        if row < 0 || row >= self.height as i32 || col < 0 || col >= self.width as i32 {
            return true;
        }
        self.occupancy[(row as usize, col as usize)] != 0
    }

    pub fn set_occupied(&mut self, row: usize, col: usize, occupied: bool) {
        self.occupancy[(row, col)] = i32::from(occupied);
    }

    pub fn is_valid(&self, s: &State) -> bool {
        let g = s.to_grid();
        !self.occupied(g.row, g.col)
    }

    /// Rasterizes the segment between the two states' grid coordinates
    /// with integer Bresenham stepping and requires every traversed
    /// cell to be free. A degenerate segment never collides.
    pub fn collision_free(&self, a: &State, b: &State) -> bool {
        let ga = a.to_grid();
        let gb = b.to_grid();
        if ga == gb {
            return true;
        }
        self.line_of_sight(ga, gb)
    }

    /// Bresenham line-of-sight between two cells, both endpoints
    /// included.
    pub fn line_of_sight(&self, from: GridCoord, to: GridCoord) -> bool {
        let dr = (to.row - from.row).abs();
        let dc = (to.col - from.col).abs();
        let sr = if from.row < to.row { 1 } else { -1 };
        let sc = if from.col < to.col { 1 } else { -1 };

        let mut r = from.row;
        let mut c = from.col;
        if dc >= dr {
            let mut err = 2 * dr - dc;
            for _ in 0..=dc {
                if self.occupied(r, c) {
                    return false;
                }
                if r == to.row && c == to.col {
                    return true;
                }
                if err > 0 {
                    r += sr;
                    err -= 2 * dc;
                }
                err += 2 * dr;
                c += sc;
            }
        } else {
            let mut err = 2 * dc - dr;
            for _ in 0..=dr {
                if self.occupied(r, c) {
                    return false;
                }
                if r == to.row && c == to.col {
                    return true;
                }
                if err > 0 {
                    c += sc;
                    err -= 2 * dr;
                }
                err += 2 * dc;
                r += sr;
            }
        }
        true
    }

    /// Euclidean distance from the state's cell center to the nearest
    /// occupied cell center; 0 when the state's own cell is occupied
    /// or out of bounds.
    pub fn clearance(&self, s: &State) -> f64 {
        let g = s.to_grid();
        if self.occupied(g.row, g.col) {
            return 0.0;
        }
        let mut min_d2 = f64::MAX;
        for r in 0..self.height {
            for c in 0..self.width {
                if self.occupancy[(r, c)] != 0 {
                    let dr = r as f64 - g.row as f64;
                    let dc = c as f64 - g.col as f64;
                    min_d2 = min_d2.min(dr * dr + dc * dc);
                }
            }
        }
        if min_d2 == f64::MAX {
            NO_OBSTACLE_CLEARANCE
        } else {
            min_d2.sqrt()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let data: GridMapData = serde_json::from_str(json)?;
        Self::new(data.width, data.height, data.occupancy)
    }

    pub fn to_json(&self) -> Result<String> {
        let occupancy = (0..self.height)
            .map(|r| (0..self.width).map(|c| self.occupancy[(r, c)]).collect())
            .collect();
        let data = GridMapData { width: self.width, height: self.height, occupancy };
        Ok(serde_json::to_string(&data)?)
    }
}
