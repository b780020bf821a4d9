use super::{Point, Vector};

/// Approximate scalar equality within `epsilon`.
#[must_use]
pub fn float_equal(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// Approximate point equality, coordinate-wise within `epsilon`.
#[must_use]
pub fn points_equal(a: Point, b: Point, epsilon: f64) -> bool {
    float_equal(a.x, b.x, epsilon) && float_equal(a.y, b.y, epsilon)
}

/// The candidate closest to `target` by squared distance.
#[must_use]
pub fn closest_point_to(target: Point, candidates: &[Point]) -> Option<Point> {
    let mut best: Option<(f64, Point)> = None;
    for &p in candidates {
        let d: Vector = p - target;
        let dist2 = d.dot(&d);
        match best {
            Some((best_dist2, _)) if best_dist2 <= dist2 => {}
            _ => best = Some((dist2, p)),
        }
    }
    best.map(|(_, p)| p)
}

/// Whether the given points are collinear *in the order passed in*.
///
/// Checks that each successive direction vector keeps pointing the
/// same way (cosine within `epsilon` of 1), so reversing an interior
/// point changes the result: `(0,0), (2,2), (1,1)` is not collinear.
#[must_use]
pub fn collinear(points: &[Point], epsilon: f64) -> bool {
    let vectors: Vec<Vector> = points.windows(2).map(|w| w[1] - w[0]).collect();
    for pair in vectors.windows(2) {
        let (u, v) = (pair[0], pair[1]);
        let ratio = u.dot(&v) / (u.norm() * v.norm());
        if ratio < 1.0 - epsilon {
            return false;
        }
    }
    true
}

/// Collects index pairs of points that sit in the same spot, with no
/// other point nearby.
///
/// Builds an equality graph (edge iff approximately equal) and keeps
/// only mutual, unique matches: a point with two or more coincident
/// neighbors is ambiguous and produces no pair at all. Quadratic in
/// the number of points, which is fine for the bounded number of path
/// endpoints a drawing produces.
#[must_use]
pub fn find_point_pairs(points: &[Point], epsilon: f64) -> Vec<(usize, usize)> {
    let n = points.len();
    let mut graph: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if points_equal(points[i], points[j], epsilon) {
                graph[i].push(j);
                graph[j].push(i);
            }
        }
    }

    let mut pairs = Vec::new();
    let mut paired = vec![false; n];
    for i in 0..n {
        if paired[i] || graph[i].len() != 1 {
            continue;
        }
        let j = graph[i][0];
        if graph[j].len() == 1 {
            pairs.push((i, j));
            paired[i] = true;
            paired[j] = true;
        }
    }
    pairs
}
