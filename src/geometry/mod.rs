//! Geometric primitives: polygons, collision predicates, and the 2D
//! spatial index used by the roadmap planners.

pub mod collision;
pub mod kdtree;
pub mod polygon;

pub use collision::{
    clearance_at, point_segment_distance, segment_intersects_any, segments_intersect,
    NO_OBSTACLE_CLEARANCE,
};
pub use kdtree::KdTree2d;
pub use polygon::Polygon;

/// 2D point used throughout the geometry layer.
pub type Point2 = nalgebra::Point2<f64>;
