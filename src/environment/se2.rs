//! Orientation-augmented wrapper over a continuous workspace

use std::f64::consts::PI;

use crate::common::State;
use crate::environment::{Bounds, ContinuousEnvironment};

/// Delegates every geometric query to the wrapped continuous
/// environment and additionally rejects states whose heading falls
/// outside [0, 2π). States without a heading pass the heading check.
#[derive(Debug, Clone)]
pub struct Se2Environment {
    base: ContinuousEnvironment,
}

impl Se2Environment {
    pub fn new(base: ContinuousEnvironment) -> Self {
        Self { base }
    }

    pub fn is_valid(&self, s: &State) -> bool {
        if !self.base.is_valid(s) {
            return false;
        }
        match s.heading {
            Some(theta) => (0.0..2.0 * PI).contains(&theta),
            None => true,
        }
    }

    pub fn collision_free(&self, a: &State, b: &State) -> bool {
        self.base.collision_free(a, b)
    }

    pub fn clearance(&self, s: &State) -> f64 {
        self.base.clearance(s)
    }

    pub fn bounds(&self) -> Bounds {
        self.base.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapper() -> Se2Environment {
        Se2Environment::new(ContinuousEnvironment::new(
            Bounds::new(0.0, 10.0, 0.0, 10.0),
            Vec::new(),
        ))
    }

    #[test]
    fn test_heading_range() {
        let env = wrapper();
        assert!(env.is_valid(&State::with_heading(1.0, 1.0, 0.0)));
        assert!(env.is_valid(&State::with_heading(1.0, 1.0, PI)));
        assert!(!env.is_valid(&State::with_heading(1.0, 1.0, 2.0 * PI)));
        assert!(!env.is_valid(&State::with_heading(1.0, 1.0, -0.1)));
    }

    #[test]
    fn test_headingless_state_delegates() {
        let env = wrapper();
        assert!(env.is_valid(&State::new(1.0, 1.0)));
        assert!(!env.is_valid(&State::new(-1.0, 1.0)));
    }

    #[test]
    fn test_bounds_delegate() {
        let env = wrapper();
        assert_eq!(env.bounds().x_max, 10.0);
    }
}
