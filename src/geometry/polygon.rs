//! Closed polygon obstacles

use crate::geometry::Point2;

/// An ordered, closed loop of vertices (at least 3). The closing edge
/// from the last vertex back to the first is implicit.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    pub fn from_xy(coords: &[(f64, f64)]) -> Self {
        Self { vertices: coords.iter().map(|&(x, y)| Point2::new(x, y)).collect() }
    }

    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Boundary edges in loop order, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Even-odd (crossing number) containment test. A point exactly on
    /// an edge is unspecified.
    pub fn contains(&self, p: &Point2) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        let mut inside = false;
        let n = self.vertices.len();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            if (a.y > p.y) != (b.y > p.y)
                && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
        }
        inside
    }

    /// Axis-aligned bounding box as (min corner, max corner).
    pub fn bounding_box(&self) -> (Point2, Point2) {
        let mut min = Point2::new(f64::MAX, f64::MAX);
        let mut max = Point2::new(f64::MIN, f64::MIN);
        for v in &self.vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        (min, max)
    }
}
