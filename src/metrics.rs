//! Per-run quality metrics
//!
//! Everything derivable from a single planner run: geometric path
//! quality, search effort, and wall-clock time. Paths with fewer than
//! two states score zero on the geometric metrics.

use std::time::Duration;

use serde::Serialize;

use crate::common::Path;
use crate::environment::Environment;
use crate::geometry::NO_OBSTACLE_CLEARANCE;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Metrics {
    pub success: bool,
    pub path_length: f64,
    pub computation_time_ms: f64,
    pub nodes_expanded: usize,
    /// Sum of absolute heading changes along the path, radians. Zero
    /// for a straight line.
    pub smoothness: f64,
    /// Minimum obstacle clearance over the path states. Zero when the
    /// environment has no obstacles or none was supplied.
    pub clearance: f64,
    /// Curvature-squared integral approximated over path vertices.
    pub energy: f64,
}

/// Wrap an angle difference into [-pi, pi].
fn angle_diff(a: f64, b: f64) -> f64 {
    let mut d = b - a;
    while d > std::f64::consts::PI {
        d -= 2.0 * std::f64::consts::PI;
    }
    while d < -std::f64::consts::PI {
        d += 2.0 * std::f64::consts::PI;
    }
    d
}

#[derive(Debug, Default)]
pub struct MetricsCollector;

impl MetricsCollector {
    pub fn new() -> Self {
        Self
    }

    pub fn collect(
        &self,
        path: &Path,
        elapsed: Duration,
        nodes_expanded: usize,
        env: Option<&Environment>,
    ) -> Metrics {
        let mut m = Metrics {
            success: path.success,
            path_length: path.length,
            computation_time_ms: elapsed.as_secs_f64() * 1000.0,
            nodes_expanded,
            ..Default::default()
        };
        if path.states.len() < 2 {
            return m;
        }

        m.smoothness = Self::smoothness(path);
        m.energy = Self::energy(path);
        if let Some(env) = env {
            m.clearance = Self::min_clearance(path, env);
        }
        m
    }

    fn segment_angles(path: &Path) -> Vec<(f64, f64)> {
        path.states
            .windows(2)
            .map(|pair| {
                let dx = pair[1].x - pair[0].x;
                let dy = pair[1].y - pair[0].y;
                (dy.atan2(dx), dx.hypot(dy))
            })
            .collect()
    }

    fn smoothness(path: &Path) -> f64 {
        let segments = Self::segment_angles(path);
        segments
            .windows(2)
            .map(|pair| angle_diff(pair[0].0, pair[1].0).abs())
            .sum()
    }

    fn energy(path: &Path) -> f64 {
        let segments = Self::segment_angles(path);
        let mut energy = 0.0;
        for pair in segments.windows(2) {
            let (a0, d0) = pair[0];
            let (a1, d1) = pair[1];
            let arc = (d0 + d1) / 2.0;
            if arc < 1e-9 {
                continue;
            }
            let curvature = angle_diff(a0, a1) / arc;
            energy += curvature * curvature * arc;
        }
        energy
    }

    fn min_clearance(path: &Path, env: &Environment) -> f64 {
        let min = path
            .states
            .iter()
            .map(|s| env.clearance(s))
            .fold(f64::INFINITY, f64::min);
        // The sentinel means the workspace has no obstacles at all;
        // clearance is not a meaningful number then.
        if min > NO_OBSTACLE_CLEARANCE * 0.1 {
            0.0
        } else {
            min
        }
    }
}
