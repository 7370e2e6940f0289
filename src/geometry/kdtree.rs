//! 2D spatial index for nearest-neighbor and radius queries
//!
//! Built once per planning call as an immutable snapshot of a point
//! set. The layout is the classic balanced binary space partition:
//! each range of the index array is median-split on alternating axes,
//! with the median as the subtree root. Queries prune on the splitting
//! plane but are exact: the result sets match a brute-force linear
//! scan, with ties broken by index order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::geometry::Point2;

#[derive(Debug, Clone)]
pub struct KdTree2d {
    points: Vec<Point2>,
    indices: Vec<usize>,
}

impl KdTree2d {
    pub fn build(points: Vec<Point2>) -> Self {
        let indices: Vec<usize> = (0..points.len()).collect();
        let mut tree = Self { points, indices };
        let n = tree.indices.len();
        tree.build_rec(0, n, 0);
        tree
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, i: usize) -> &Point2 {
        &self.points[i]
    }

    fn build_rec(&mut self, l: usize, r: usize, axis: usize) {
        if r - l <= 1 {
            return;
        }
        let mid = l + (r - l) / 2;
        let points = &self.points;
        self.indices[l..r].select_nth_unstable_by(mid - l, |&a, &b| {
            let va = axis_coord(&points[a], axis);
            let vb = axis_coord(&points[b], axis);
            va.partial_cmp(&vb).unwrap_or(Ordering::Equal)
        });
        self.build_rec(l, mid, 1 - axis);
        self.build_rec(mid + 1, r, 1 - axis);
    }

    /// Index of the single closest point.
    pub fn nearest(&self, q: &Point2) -> Option<usize> {
        self.k_nearest(q, 1).into_iter().next()
    }

    /// Indices of the k closest points, ascending by distance (ties by
    /// index).
    pub fn k_nearest(&self, q: &Point2, k: usize) -> Vec<usize> {
        if k == 0 || self.points.is_empty() {
            return Vec::new();
        }
        let k = k.min(self.points.len());
        let mut heap: BinaryHeap<(OrderedFloat<f64>, usize)> = BinaryHeap::with_capacity(k + 1);
        self.knn_rec(0, self.indices.len(), 0, q, k, &mut heap);
        let mut result: Vec<(OrderedFloat<f64>, usize)> = heap.into_vec();
        result.sort_unstable();
        result.into_iter().map(|(_, i)| i).collect()
    }

    fn knn_rec(
        &self,
        l: usize,
        r: usize,
        axis: usize,
        q: &Point2,
        k: usize,
        heap: &mut BinaryHeap<(OrderedFloat<f64>, usize)>,
    ) {
        if l >= r {
            return;
        }
        let mid = l + (r - l) / 2;
        let idx = self.indices[mid];
        let d2 = (self.points[idx] - *q).norm_squared();
        let entry = (OrderedFloat(d2), idx);
        if heap.len() < k {
            heap.push(entry);
        } else if let Some(&worst) = heap.peek() {
            if entry < worst {
                heap.pop();
                heap.push(entry);
            }
        }

        let qa = axis_coord(q, axis);
        let pa = axis_coord(&self.points[idx], axis);
        let (near, far) = if qa < pa { ((l, mid), (mid + 1, r)) } else { ((mid + 1, r), (l, mid)) };
        self.knn_rec(near.0, near.1, 1 - axis, q, k, heap);

        let plane_d2 = (qa - pa) * (qa - pa);
        let must_visit_far = heap.len() < k
            || heap.peek().map_or(true, |&(worst, _)| plane_d2 <= worst.into_inner());
        if must_visit_far {
            self.knn_rec(far.0, far.1, 1 - axis, q, k, heap);
        }
    }

    /// Indices of all points within `radius` of `q`, in index order.
    pub fn radius_search(&self, q: &Point2, radius: f64) -> Vec<usize> {
        let mut result = Vec::new();
        self.radius_rec(0, self.indices.len(), 0, q, radius * radius, &mut result);
        result.sort_unstable();
        result
    }

    fn radius_rec(
        &self,
        l: usize,
        r: usize,
        axis: usize,
        q: &Point2,
        r2: f64,
        out: &mut Vec<usize>,
    ) {
        if l >= r {
            return;
        }
        let mid = l + (r - l) / 2;
        let idx = self.indices[mid];
        if (self.points[idx] - *q).norm_squared() <= r2 {
            out.push(idx);
        }
        let qa = axis_coord(q, axis);
        let pa = axis_coord(&self.points[idx], axis);
        let (near, far) = if qa < pa { ((l, mid), (mid + 1, r)) } else { ((mid + 1, r), (l, mid)) };
        self.radius_rec(near.0, near.1, 1 - axis, q, r2, out);
        if (qa - pa) * (qa - pa) <= r2 {
            self.radius_rec(far.0, far.1, 1 - axis, q, r2, out);
        }
    }
}

fn axis_coord(p: &Point2, axis: usize) -> f64 {
    if axis == 0 {
        p.x
    } else {
        p.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn brute_force_knn(points: &[Point2], q: &Point2, k: usize) -> Vec<usize> {
        let mut order: Vec<(OrderedFloat<f64>, usize)> = points
            .iter()
            .enumerate()
            .map(|(i, p)| (OrderedFloat((p - *q).norm_squared()), i))
            .collect();
        order.sort_unstable();
        order.into_iter().take(k).map(|(_, i)| i).collect()
    }

    fn random_points(n: usize, seed: u64) -> Vec<Point2> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| Point2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
            .collect()
    }

    #[test]
    fn test_k_nearest_matches_brute_force() {
        let points = random_points(200, 7);
        let tree = KdTree2d::build(points.clone());
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..50 {
            let q = Point2::new(rng.gen_range(-12.0..12.0), rng.gen_range(-12.0..12.0));
            for k in [1, 3, 10] {
                assert_eq!(tree.k_nearest(&q, k), brute_force_knn(&points, &q, k));
            }
        }
    }

    #[test]
    fn test_radius_search_matches_brute_force() {
        let points = random_points(200, 11);
        let tree = KdTree2d::build(points.clone());
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..50 {
            let q = Point2::new(rng.gen_range(-12.0..12.0), rng.gen_range(-12.0..12.0));
            let r = rng.gen_range(0.5..6.0);
            let expected: Vec<usize> = points
                .iter()
                .enumerate()
                .filter(|(_, p)| (*p - q).norm_squared() <= r * r)
                .map(|(i, _)| i)
                .collect();
            assert_eq!(tree.radius_search(&q, r), expected);
        }
    }

    #[test]
    fn test_k_larger_than_point_count() {
        let points = random_points(5, 3);
        let tree = KdTree2d::build(points);
        assert_eq!(tree.k_nearest(&Point2::new(0.0, 0.0), 20).len(), 5);
    }

    #[test]
    fn test_empty_tree() {
        let tree = KdTree2d::build(Vec::new());
        assert!(tree.is_empty());
        assert!(tree.k_nearest(&Point2::new(0.0, 0.0), 3).is_empty());
        assert!(tree.radius_search(&Point2::new(0.0, 0.0), 1.0).is_empty());
        assert_eq!(tree.nearest(&Point2::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_nearest_single() {
        let tree = KdTree2d::build(vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 5.0),
            Point2::new(1.0, 1.0),
        ]);
        assert_eq!(tree.nearest(&Point2::new(1.2, 0.9)), Some(2));
    }
}
