//! Segment intersection, point-to-segment distance, and clearance
//! queries against polygon obstacle sets.

use crate::geometry::{Point2, Polygon};

const EPS: f64 = 1e-9;

/// Clearance reported when there are no obstacles at all.
pub const NO_OBSTACLE_CLEARANCE: f64 = 1e9;

fn cross(o: &Point2, a: &Point2, b: &Point2) -> f64 {
    (a - o).perp(&(b - o))
}

fn on_segment(p: &Point2, a: &Point2, b: &Point2) -> bool {
    a.x.min(b.x) <= p.x + EPS
        && p.x <= a.x.max(b.x) + EPS
        && a.y.min(b.y) <= p.y + EPS
        && p.y <= a.y.max(b.y) + EPS
}

/// Orientation-based segment intersection with a collinear/on-segment
/// fallback: near-parallel touching segments count as intersecting.
pub fn segments_intersect(a1: &Point2, a2: &Point2, b1: &Point2, b2: &Point2) -> bool {
    let d1 = cross(b1, b2, a1);
    let d2 = cross(b1, b2, a2);
    let d3 = cross(a1, a2, b1);
    let d4 = cross(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    if d1.abs() < EPS && on_segment(a1, b1, b2) {
        return true;
    }
    if d2.abs() < EPS && on_segment(a2, b1, b2) {
        return true;
    }
    if d3.abs() < EPS && on_segment(b1, a1, a2) {
        return true;
    }
    if d4.abs() < EPS && on_segment(b2, a1, a2) {
        return true;
    }
    false
}

/// Distance from `p` to the closest point of segment [s1, s2]: the
/// projection parameter is clamped to [0, 1] before measuring.
pub fn point_segment_distance(p: &Point2, s1: &Point2, s2: &Point2) -> f64 {
    let d = s2 - s1;
    let len2 = d.norm_squared();
    if len2 < 1e-18 {
        return (p - s1).norm();
    }
    let t = ((p - s1).dot(&d) / len2).clamp(0.0, 1.0);
    let proj = s1 + d * t;
    (p - proj).norm()
}

/// True if the segment [a, b] crosses the boundary of any obstacle.
pub fn segment_intersects_any(obstacles: &[Polygon], a: &Point2, b: &Point2) -> bool {
    obstacles
        .iter()
        .any(|poly| poly.edges().any(|(v1, v2)| segments_intersect(a, b, &v1, &v2)))
}

/// Minimum distance from `p` to any obstacle boundary edge. Zero if
/// `p` is inside an obstacle; [`NO_OBSTACLE_CLEARANCE`] if there are
/// no obstacles.
pub fn clearance_at(obstacles: &[Polygon], p: &Point2) -> f64 {
    let mut min_dist = f64::MAX;
    for poly in obstacles {
        if poly.contains(p) {
            return 0.0;
        }
        for (v1, v2) in poly.edges() {
            min_dist = min_dist.min(point_segment_distance(p, &v1, &v2));
        }
    }
    if min_dist == f64::MAX {
        NO_OBSTACLE_CLEARANCE
    } else {
        min_dist
    }
}
