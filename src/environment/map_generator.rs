//! Seeded test-environment generation
//!
//! Two generators: uniform random occupancy for density sweeps, and a
//! perfect maze (Kruskal spanning tree over a room lattice) whose free
//! cells form exactly one connected component.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::environment::GridEnvironment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapKind {
    #[default]
    RandomUniform,
    Maze,
}

#[derive(Debug, Clone)]
pub struct MapGeneratorParams {
    pub width: usize,
    pub height: usize,
    pub obstacle_density: f64,
    pub seed: u64,
    pub kind: MapKind,
}

impl Default for MapGeneratorParams {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            obstacle_density: 0.2,
            seed: 0,
            kind: MapKind::RandomUniform,
        }
    }
}

#[derive(Debug, Default)]
pub struct MapGenerator {
    seed: u64,
}

impl MapGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn generate(&mut self, params: &MapGeneratorParams) -> GridEnvironment {
        let seed = if params.seed != 0 { params.seed } else { self.seed };
        self.seed = seed;
        let mut rng = StdRng::seed_from_u64(seed);
        match params.kind {
            MapKind::RandomUniform => generate_random_uniform(
                params.width,
                params.height,
                params.obstacle_density,
                &mut rng,
            ),
            MapKind::Maze => generate_maze(params.width, params.height, &mut rng),
        }
    }
}

/// Each cell becomes an obstacle with probability `density`; the start
/// corner (0,0) and goal corner (h-1,w-1) stay free.
fn generate_random_uniform(
    width: usize,
    height: usize,
    density: f64,
    rng: &mut StdRng,
) -> GridEnvironment {
    let mut env = GridEnvironment::empty(width, height);
    for r in 0..height {
        for c in 0..width {
            if (r == 0 && c == 0) || (r == height - 1 && c == width - 1) {
                continue;
            }
            if rng.gen_range(0.0..1.0) < density {
                env.set_occupied(r, c, true);
            }
        }
    }
    env
}

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect(), rank: vec![0; n] }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            let root = self.find(self.parent[x]);
            self.parent[x] = root;
        }
        self.parent[x]
    }

    fn unite(&mut self, a: usize, b: usize) {
        let a = self.find(a);
        let b = self.find(b);
        if a == b {
            return;
        }
        if self.rank[a] < self.rank[b] {
            self.parent[a] = b;
        } else if self.rank[a] > self.rank[b] {
            self.parent[b] = a;
        } else {
            self.parent[b] = a;
            self.rank[a] += 1;
        }
    }
}

/// Perfect maze over `cells_wide` x `cells_high` rooms. The occupancy
/// grid is (2H+1) x (2W+1): rooms at odd indices, walls between them.
/// Kruskal over the shuffled room adjacencies knocks down exactly the
/// walls of a spanning tree, so every pair of rooms is connected by a
/// unique corridor.
fn generate_maze(cells_wide: usize, cells_high: usize, rng: &mut StdRng) -> GridEnvironment {
    let grid_w = 2 * cells_wide + 1;
    let grid_h = 2 * cells_high + 1;

    let mut env = GridEnvironment::empty(grid_w, grid_h);
    for r in 0..grid_h {
        for c in 0..grid_w {
            env.set_occupied(r, c, true);
        }
    }
    for r in 0..cells_high {
        for c in 0..cells_wide {
            env.set_occupied(2 * r + 1, 2 * c + 1, false);
        }
    }

    let mut edges: Vec<(usize, usize)> = Vec::new();
    for r in 0..cells_high {
        for c in 0..cells_wide {
            let idx = r * cells_wide + c;
            if r + 1 < cells_high {
                edges.push((idx, (r + 1) * cells_wide + c));
            }
            if c + 1 < cells_wide {
                edges.push((idx, r * cells_wide + (c + 1)));
            }
        }
    }
    edges.shuffle(rng);

    let mut uf = UnionFind::new(cells_wide * cells_high);
    for (a, b) in edges {
        if uf.find(a) != uf.find(b) {
            uf.unite(a, b);
            let (ra, ca) = (a / cells_wide, a % cells_wide);
            if b == a + cells_wide {
                env.set_occupied(2 * ra + 2, 2 * ca + 1, false);
            } else {
                env.set_occupied(2 * ra + 1, 2 * ca + 2, false);
            }
        }
    }
    env
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_keeps_corners_free() {
        let mut gen = MapGenerator::new(99);
        let params = MapGeneratorParams {
            width: 20,
            height: 20,
            obstacle_density: 0.9,
            ..Default::default()
        };
        let env = gen.generate(&params);
        assert!(!env.occupied(0, 0));
        assert!(!env.occupied(19, 19));
    }

    #[test]
    fn test_same_seed_same_map() {
        let params = MapGeneratorParams {
            width: 15,
            height: 15,
            obstacle_density: 0.3,
            seed: 7,
            kind: MapKind::RandomUniform,
        };
        let a = MapGenerator::default().generate(&params);
        let b = MapGenerator::default().generate(&params);
        for r in 0..15 {
            for c in 0..15 {
                assert_eq!(a.occupied(r, c), b.occupied(r, c));
            }
        }
    }

    #[test]
    fn test_maze_dimensions_and_rooms() {
        let params = MapGeneratorParams {
            width: 5,
            height: 4,
            seed: 3,
            kind: MapKind::Maze,
            ..Default::default()
        };
        let env = MapGenerator::default().generate(&params);
        assert_eq!(env.width(), 11);
        assert_eq!(env.height(), 9);
        for r in 0..4 {
            for c in 0..5 {
                assert!(!env.occupied(2 * r + 1, 2 * c + 1));
            }
        }
        // Outer border stays walled.
        for c in 0..11 {
            assert!(env.occupied(0, c));
            assert!(env.occupied(8, c));
        }
    }

    #[test]
    fn test_maze_every_room_reachable() {
        // A spanning tree over the rooms means a search planner finds
        // a path from the first room to every other room.
        use crate::common::{Planner, State};
        use crate::environment::Environment;
        use crate::planners::DijkstraPlanner;

        let params = MapGeneratorParams {
            width: 8,
            height: 8,
            seed: 21,
            kind: MapKind::Maze,
            ..Default::default()
        };
        let env = Environment::Grid(MapGenerator::default().generate(&params));
        let planner = DijkstraPlanner::new();
        let start = State::from_grid(1, 1);
        for r in 0..8 {
            for c in 0..8 {
                let goal = State::from_grid(2 * r + 1, 2 * c + 1);
                let result = planner.solve(&env, &start, &goal);
                assert!(result.path.success, "room ({}, {}) unreachable", r, c);
            }
        }
    }
}
