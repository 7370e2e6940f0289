//! Continuous polygon-obstacle workspace

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result, State};
use crate::environment::Bounds;
use crate::geometry::{clearance_at, segment_intersects_any, Point2, Polygon};

#[derive(Debug, Serialize, Deserialize)]
struct VertexData {
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct PolygonData {
    vertices: Vec<VertexData>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContinuousMapData {
    bounds: Bounds,
    obstacles: Vec<PolygonData>,
}

/// Bounded rectangular workspace containing polygon obstacles.
#[derive(Debug, Clone)]
pub struct ContinuousEnvironment {
    bounds: Bounds,
    obstacles: Vec<Polygon>,
}

impl ContinuousEnvironment {
    pub fn new(bounds: Bounds, obstacles: Vec<Polygon>) -> Self {
        Self { bounds, obstacles }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn obstacles(&self) -> &[Polygon] {
        &self.obstacles
    }

    /// Inside the workspace rectangle and outside every obstacle.
    pub fn is_valid(&self, s: &State) -> bool {
        if !self.bounds.contains(s.x, s.y) {
            return false;
        }
        let p = Point2::new(s.x, s.y);
        !self.obstacles.iter().any(|poly| poly.contains(&p))
    }

    /// No obstacle boundary edge intersects the query segment.
    pub fn collision_free(&self, a: &State, b: &State) -> bool {
        let pa = Point2::new(a.x, a.y);
        let pb = Point2::new(b.x, b.y);
        !segment_intersects_any(&self.obstacles, &pa, &pb)
    }

    pub fn clearance(&self, s: &State) -> f64 {
        clearance_at(&self.obstacles, &Point2::new(s.x, s.y))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let data: ContinuousMapData = serde_json::from_str(json)?;
        if !data.bounds.is_ordered() {
            return Err(Error::InvalidEnvironment(format!(
                "inverted bounds: x [{}, {}], y [{}, {}]",
                data.bounds.x_min, data.bounds.x_max, data.bounds.y_min, data.bounds.y_max
            )));
        }
        let mut obstacles = Vec::with_capacity(data.obstacles.len());
        for (i, poly) in data.obstacles.iter().enumerate() {
            if poly.vertices.len() < 3 {
                return Err(Error::InvalidEnvironment(format!(
                    "obstacle {} has {} vertices, need at least 3",
                    i,
                    poly.vertices.len()
                )));
            }
            obstacles.push(Polygon::new(
                poly.vertices.iter().map(|v| Point2::new(v.x, v.y)).collect(),
            ));
        }
        Ok(Self::new(data.bounds, obstacles))
    }

    pub fn to_json(&self) -> Result<String> {
        let data = ContinuousMapData {
            bounds: self.bounds,
            obstacles: self
                .obstacles
                .iter()
                .map(|poly| PolygonData {
                    vertices: poly
                        .vertices()
                        .iter()
                        .map(|v| VertexData { x: v.x, y: v.y })
                        .collect(),
                })
                .collect(),
        };
        Ok(serde_json::to_string(&data)?)
    }
}
