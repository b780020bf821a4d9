use super::points::{float_equal, points_equal};
use super::{Point, Vector};

/// Counter-clockwise perpendicular, used for 2D cross products.
fn perp(v: Vector) -> Vector {
    Vector::new(-v.y, v.x)
}

/// Intersection of the infinite lines through `a`-`b` and `c`-`d`.
///
/// With `segment` set, the lines are treated as bounded segments and
/// the intersection is discarded when it falls off the end of either.
/// Returns `None` for parallel (or collinear) lines.
#[must_use]
pub fn intersect_lines(
    a: Point,
    b: Point,
    c: Point,
    d: Point,
    segment: bool,
    epsilon: f64,
) -> Option<Point> {
    let u = b - a;
    let v = d - c;
    let w = a - c;

    let u_perp_dot_v = perp(u).dot(&v);
    if float_equal(u_perp_dot_v, 0.0, epsilon) {
        return None;
    }

    let s = perp(v).dot(&w) / u_perp_dot_v;
    if segment && !(0.0..=1.0).contains(&s) {
        return None;
    }

    let t = perp(u).dot(&w) / u_perp_dot_v;
    if segment && !(0.0..=1.0).contains(&t) {
        return None;
    }

    Some(a + u * s)
}

/// Numerically stable quadratic roots.
///
/// Chooses the expansion by the sign of `b` so neither root suffers
/// catastrophic cancellation. The discriminant is clamped at zero to
/// absorb rounding on tangent configurations.
#[must_use]
pub fn quadratic_formula(a: f64, b: f64, c: f64) -> (f64, f64) {
    let disc = (b * b - 4.0 * a * c).max(0.0).sqrt();
    if b >= 0.0 {
        let d = -b - disc;
        (d / (2.0 * a), (2.0 * c) / d)
    } else {
        let d = -b + disc;
        ((2.0 * c) / d, d / (2.0 * a))
    }
}

/// Intersection of a circle with the infinite line through `p0`-`p1`.
///
/// A negative radius means "use the magnitude"; the signed-radius
/// convention of arc offsets flows through here unchanged. Returns
/// zero, one (tangent) or two points.
#[must_use]
pub fn intersect_circle_line(
    center: Point,
    radius: f64,
    p0: Point,
    p1: Point,
    epsilon: f64,
) -> Vec<Point> {
    let radius = radius.abs();

    // Perpendicular distance from the center decides tangency or a
    // clean miss before any quadratic is solved.
    let r = p0 - center;
    let v = perp(p1 - p0);
    let d = v * (r.dot(&v) / v.dot(&v));
    let dist = d.norm();
    if float_equal(dist, radius, epsilon) {
        return vec![center + d];
    } else if dist > radius {
        return Vec::new();
    }

    let line = p1 - p0;
    let f = p0 - center;
    let a = line.dot(&line);
    let b = 2.0 * line.dot(&f);
    let c = f.dot(&f) - radius * radius;
    let (t0, t1) = quadratic_formula(a, b, c);

    vec![p0 + line * t0, p0 + line * t1]
}

/// Intersection of two circles.
///
/// Identical or concentric circles share no single point (either none
/// or infinitely many) and report empty; tangency reports one point;
/// otherwise the standard chord construction yields two.
#[must_use]
pub fn intersect_circles(
    center1: Point,
    radius1: f64,
    center2: Point,
    radius2: f64,
    epsilon: f64,
) -> Vec<Point> {
    let radius1 = radius1.abs();
    let radius2 = radius2.abs();
    if radius2 > radius1 {
        return intersect_circles(center2, radius2, center1, radius1, epsilon);
    }

    if points_equal(center1, center2, epsilon) {
        return Vec::new();
    }

    let transverse = center2 - center1;
    let dist = transverse.norm();

    let radius_sum = radius1 + radius2;
    let radius_difference = (radius1 - radius2).abs();
    if float_equal(dist, radius_sum, epsilon) || float_equal(dist, radius_difference, epsilon) {
        return vec![center1 + transverse * (radius1 / dist)];
    }

    if dist > radius_sum || dist < radius_difference {
        return Vec::new();
    }

    // Chord construction: the two intersection points straddle the
    // center line at distance x from center1.
    let dist2 = transverse.dot(&transverse);
    let x = (dist2 - radius2 * radius2 + radius1 * radius1) / (2.0 * dist);
    let chord_half = (1.0 / dist)
        * ((-dist + radius1 - radius2)
            * (-dist - radius1 + radius2)
            * (-dist + radius1 + radius2)
            * (dist + radius1 + radius2))
            .max(0.0)
            .sqrt()
        / 2.0;

    let chord_middle = center1 + transverse * (x / dist);
    let p = perp(transverse) * (1.0 / dist);
    vec![chord_middle + p * chord_half, chord_middle - p * chord_half]
}
