use crate::math::angle::Angle;
use crate::math::intersect::{intersect_circle_line, intersect_circles, intersect_lines};
use crate::math::points::{closest_point_to, float_equal, points_equal};
use crate::math::{GeometryConfig, Point};

use super::{ArcSegment, LineSegment, Segment, SegmentEnd, Side};

/// Resolves the joint between two consecutive segments, writing the
/// shared corners into both.
///
/// Whatever cannot be solved — opposing tangents, a turn sharper than
/// the configured limit, parallel or non-intersecting offsets,
/// incompatible concentric arcs — flags the adjoining joint on both
/// segments and leaves the affected corners as they were. Joints with
/// no thickness on either side are a no-op.
pub(crate) fn join_segments(prev: &mut Segment, next: &mut Segment, config: &GeometryConfig) {
    let (Some(w1), Some(w2)) = (prev.width(), next.width()) else {
        return;
    };
    if float_equal(w1, 0.0, config.epsilon) || float_equal(w2, 0.0, config.epsilon) {
        return;
    }

    let turn = prev.end_heading().angle_to(next.start_heading());
    let sharpness = turn.abs().degrees();

    // A stroke turning back on itself has no joint at all.
    if float_equal(sharpness, 180.0, config.epsilon) {
        prev.mark_end_illegal();
        next.mark_start_illegal();
        return;
    }

    // Past the sharpness limit the outer miter shoots off to infinity;
    // only the inner side is worth attempting, and the joint stays
    // flagged either way.
    let too_sharp = sharpness > config.max_turn_angle;
    let inner = if turn.degrees() > 0.0 {
        Side::Left
    } else {
        Side::Right
    };
    let sides: &[Side] = if too_sharp {
        std::slice::from_ref(&inner)
    } else {
        &[Side::Left, Side::Right]
    };

    let mut failed = too_sharp;
    for &side in sides {
        match joint_corner(prev, next, side, turn, config) {
            Some(corner) => {
                prev.set_corner(SegmentEnd::End, side, corner);
                next.set_corner(SegmentEnd::Start, side, corner);
            }
            None => failed = true,
        }
    }

    if failed {
        prev.mark_end_illegal();
        next.mark_start_illegal();
    }
}

/// One side's joint corner, dispatched over the four segment-variant
/// combinations. `None` means that side has no solvable corner.
fn joint_corner(
    prev: &Segment,
    next: &Segment,
    side: Side,
    turn: Angle,
    config: &GeometryConfig,
) -> Option<Point> {
    match (prev, next) {
        (Segment::Line(p), Segment::Line(n)) => corner_line_line(p, n, side, turn, config),
        (Segment::Line(p), Segment::Arc(n)) => corner_line_arc(p, n, side, config),
        (Segment::Arc(p), Segment::Line(n)) => corner_arc_line(p, n, side, config),
        (Segment::Arc(p), Segment::Arc(n)) => corner_arc_arc(p, n, side, config),
    }
}

fn corner_line_line(
    prev: &LineSegment,
    next: &LineSegment,
    side: Side,
    turn: Angle,
    config: &GeometryConfig,
) -> Option<Point> {
    let w1 = prev.width?;
    let w2 = next.width?;

    let corner = if float_equal(w1, w2, config.epsilon) {
        // Equal widths: the corner sits on the angle bisector at the
        // miter distance. Intersecting the offset lines instead would
        // blow up numerically at near-straight joints.
        let half = turn / 2.0;
        let miter = half.rotate(prev.width_vector()) * (1.0 / half.to_radians().cos());
        match side {
            Side::Left => prev.b + miter,
            Side::Right => prev.b - miter,
        }
    } else {
        let (a, b) = prev.offset_line(side);
        let (c, d) = next.offset_line(side);
        intersect_lines(a, b, c, d, false, config.epsilon)?
    };

    accept_line_corner(corner, prev, next).then_some(corner)
}

/// A corner pulled back behind the first segment's start, or pushed
/// past the second segment's end, means that side of the stroke is too
/// short to meet. The miter overshoot beyond the shared endpoint is
/// fine.
fn accept_line_corner(corner: Point, prev: &LineSegment, next: &LineSegment) -> bool {
    let along_prev = (corner - prev.a).dot(&prev.heading().unit_vector());
    let along_next = (next.b - corner).dot(&next.heading().unit_vector());
    along_prev >= 0.0 && along_next >= 0.0
}

fn corner_line_arc(
    prev: &LineSegment,
    next: &ArcSegment,
    side: Side,
    config: &GeometryConfig,
) -> Option<Point> {
    let (a, b) = prev.offset_line(side);
    let hits = intersect_circle_line(next.center, next.offset_radius(side), a, b, config.epsilon);
    closest_point_to(prev.b, &hits)
}

fn corner_arc_line(
    prev: &ArcSegment,
    next: &LineSegment,
    side: Side,
    config: &GeometryConfig,
) -> Option<Point> {
    let (a, b) = next.offset_line(side);
    let hits = intersect_circle_line(prev.center, prev.offset_radius(side), a, b, config.epsilon);
    closest_point_to(prev.b, &hits)
}

fn corner_arc_arc(
    prev: &ArcSegment,
    next: &ArcSegment,
    side: Side,
    config: &GeometryConfig,
) -> Option<Point> {
    if points_equal(prev.center, next.center, config.epsilon) {
        // Concentric arcs continue each other only with the same
        // signed radius and the same width; anything else has no
        // shared offset circle to meet on.
        let same_circle = float_equal(prev.radius, next.radius, config.epsilon);
        let same_width =
            float_equal(prev.width.unwrap_or(0.0), next.width.unwrap_or(0.0), config.epsilon);
        if !(same_circle && same_width) {
            return None;
        }
        let radial = prev.b - prev.center;
        let norm = radial.norm();
        if norm == 0.0 {
            return None;
        }
        return Some(prev.center + radial * (prev.offset_radius(side).abs() / norm));
    }

    let hits = intersect_circles(
        prev.center,
        prev.offset_radius(side),
        next.center,
        next.offset_radius(side),
        config.epsilon,
    );
    closest_point_to(prev.b, &hits)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::segment::Paint;
    use crate::math::angle::Heading;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 5e-3 && (a.y - b.y).abs() < 5e-3,
            "{a:?} != {b:?}"
        );
    }

    fn line(a: Point, b: Point, width: f64, cfg: &GeometryConfig) -> Segment {
        Segment::Line(
            LineSegment::new(a, b, Some(width), Paint::default(), None, None, cfg).unwrap(),
        )
    }

    #[test]
    fn straight_equal_width_joint_is_stable_at_every_heading() {
        let cfg = GeometryConfig::default();
        for degrees in 0..360 {
            let heading = Heading::new(f64::from(degrees));
            let dir = heading.unit_vector();
            let mid = Point::from(dir * 10.0);
            let end = Point::from(dir * 20.0);

            let mut first = line(p(0.0, 0.0), mid, 1.0, &cfg);
            let mut second = line(mid, end, 1.0, &cfg);
            join_segments(&mut first, &mut second, &cfg);

            assert!(!first.end_joint_illegal(), "heading {degrees}");

            // The joint cut runs perpendicular to the heading, exactly.
            let target = (f64::from(degrees) + 90.0).rem_euclid(180.0);
            for (right, left) in [
                (first.b_right().unwrap(), first.b_left().unwrap()),
                (second.a_right().unwrap(), second.a_left().unwrap()),
            ] {
                let joint = Heading::of_vector(left - right).unwrap();
                let joint = joint.degrees().rem_euclid(180.0);
                let diff = (joint - target).abs().min(180.0 - (joint - target).abs());
                assert!(diff < 1e-6, "heading {degrees}: joint at {joint}");
            }
        }
    }

    #[test]
    fn joint_corners_are_shared_not_recomputed() {
        let cfg = GeometryConfig::default();
        let mut first = line(p(-6.0, 0.0), p(0.0, 0.0), 1.0, &cfg);
        // 60 degrees to the right.
        let dir = Heading::new(-60.0).unit_vector();
        let mut second = line(p(0.0, 0.0), Point::from(dir * 6.0), 1.0, &cfg);
        join_segments(&mut first, &mut second, &cfg);

        assert_eq!(first.b_left(), second.a_left());
        assert_eq!(first.b_right(), second.a_right());
        assert_close(first.b_left().unwrap(), p(0.29, -0.5));
        assert_close(first.b_right().unwrap(), p(-0.29, 0.5));
    }

    #[test]
    fn offwidth_joint_intersects_offset_lines() {
        let cfg = GeometryConfig::default();
        let mut first = line(p(-3.0, 0.0), p(0.0, 0.0), 1.0, &cfg);
        let mut second = line(p(0.0, 0.0), p(0.0, -3.0), 0.5, &cfg);
        join_segments(&mut first, &mut second, &cfg);

        assert!(!first.end_joint_illegal());
        assert_close(first.b_left().unwrap(), p(-0.25, -0.5));
        assert_close(first.b_right().unwrap(), p(0.25, 0.5));
        assert_eq!(first.b_left(), second.a_left());
    }

    #[test]
    fn straight_offwidth_joint_is_illegal() {
        let cfg = GeometryConfig::default();
        let mut first = line(p(0.0, 0.0), p(3.0, 0.0), 2.0, &cfg);
        let mut second = line(p(3.0, 0.0), p(6.0, 0.0), 1.0, &cfg);
        join_segments(&mut first, &mut second, &cfg);

        assert!(first.end_joint_illegal());
        assert!(second.start_joint_illegal());
        // Both keep their own perpendicular endcaps.
        assert_close(first.b_right().unwrap(), p(3.0, 1.0));
        assert_close(second.a_right().unwrap(), p(3.0, 0.5));
    }

    #[test]
    fn turn_back_makes_no_joint() {
        let cfg = GeometryConfig::default();
        let mut first = line(p(0.0, 0.0), p(10.0, 0.0), 1.0, &cfg);
        let mut second = line(p(10.0, 0.0), p(5.0, 0.0), 1.0, &cfg);
        join_segments(&mut first, &mut second, &cfg);

        assert!(first.end_joint_illegal());
        assert!(second.start_joint_illegal());
        assert_close(first.b_right().unwrap(), p(10.0, 0.5));
        assert_close(second.a_right().unwrap(), p(10.0, -0.5));
    }

    #[test]
    fn too_sharp_joint_updates_only_the_inner_side() {
        let cfg = GeometryConfig::default();

        // Long segments: the inner side meets within both segments.
        let dir = Heading::new(175.0).unit_vector();
        let mut first = line(p(0.0, 0.0), p(20.0, 0.0), 1.0, &cfg);
        let mut second = line(p(20.0, 0.0), p(20.0, 0.0) + dir * 20.0, 1.0, &cfg);
        join_segments(&mut first, &mut second, &cfg);

        assert!(first.end_joint_illegal());
        assert!(second.start_joint_illegal());
        // Inner (left, for a left turn) side joined...
        assert_close(first.b_left().unwrap(), p(8.55, -0.5));
        assert_eq!(first.b_left(), second.a_left());
        // ...outer side keeps the default cap.
        assert_close(first.b_right().unwrap(), p(20.0, 0.5));
        assert_close(second.a_right().unwrap(), p(20.04, -0.5));

        // Short segments: even the inner side cannot meet.
        let mut first = line(p(0.0, 0.0), p(10.0, 0.0), 1.0, &cfg);
        let mut second = line(p(10.0, 0.0), p(10.0, 0.0) + dir * 10.0, 1.0, &cfg);
        join_segments(&mut first, &mut second, &cfg);

        assert!(first.end_joint_illegal());
        assert_close(first.b_left().unwrap(), p(10.0, -0.5));
        assert_close(second.a_left().unwrap(), p(9.96, 0.5));
    }

    #[test]
    fn half_illegal_joint_keeps_the_outer_miter() {
        let cfg = GeometryConfig::default();
        // 165 degrees left: legal sharpness, but the segments are too
        // short for the inner side to meet.
        let dir = Heading::new(165.0).unit_vector();
        let mut first = line(p(0.0, 0.0), p(2.0, 0.0), 1.0, &cfg);
        let mut second = line(p(2.0, 0.0), p(2.0, 0.0) + dir * 2.0, 1.0, &cfg);
        join_segments(&mut first, &mut second, &cfg);

        assert!(first.end_joint_illegal());
        assert!(second.start_joint_illegal());
        // Outer (right) side met at the miter, far past the endpoint.
        assert_close(first.b_right().unwrap(), p(5.8, 0.5));
        assert_eq!(first.b_right(), second.a_right());
        // Inner side kept its defaults.
        assert_close(first.b_left().unwrap(), p(2.0, -0.5));
        assert_close(second.a_left().unwrap(), p(1.87, 0.48));
    }

    #[test]
    fn line_arc_joint_shares_offset_intersections() {
        let cfg = GeometryConfig::default();
        // Line to (3, 0), then a left half-circle of radius 3 around
        // the origin starting at heading 90.
        let mut first = line(p(0.0, 0.0), p(3.0, 0.0), 1.0, &cfg);
        let mut second = Segment::Arc(
            ArcSegment::new(
                p(3.0, 0.0),
                p(-3.0, 0.0),
                Some(1.0),
                Paint::default(),
                None,
                None,
                p(0.0, 0.0),
                3.0,
                Angle::new(180.0),
                Heading::new(90.0),
                Heading::new(270.0),
                &cfg,
            )
            .unwrap(),
        );
        join_segments(&mut first, &mut second, &cfg);

        assert!(!first.end_joint_illegal());
        let sqrt12 = 12.0_f64.sqrt();
        let sqrt6 = 6.0_f64.sqrt();
        assert_close(first.b_right().unwrap(), p(sqrt12, 0.5));
        assert_close(first.b_left().unwrap(), p(sqrt6, -0.5));
        assert_eq!(first.b_left(), second.a_left());
        assert_eq!(first.b_right(), second.a_right());
    }

    #[test]
    fn concentric_arcs_continue_radially() {
        let cfg = GeometryConfig::default();
        // Two quarter arcs around (0, -5), radius 5, width 2.
        let mut first = Segment::Arc(
            ArcSegment::new(
                p(0.0, 0.0),
                p(5.0, -5.0),
                Some(2.0),
                Paint::default(),
                None,
                None,
                p(0.0, -5.0),
                5.0,
                Angle::new(90.0),
                Heading::new(0.0),
                Heading::new(90.0),
                &cfg,
            )
            .unwrap(),
        );
        let mut second = Segment::Arc(
            ArcSegment::new(
                p(5.0, -5.0),
                p(0.0, -10.0),
                Some(2.0),
                Paint::default(),
                None,
                None,
                p(0.0, -5.0),
                5.0,
                Angle::new(90.0),
                Heading::new(90.0),
                Heading::new(180.0),
                &cfg,
            )
            .unwrap(),
        );
        join_segments(&mut first, &mut second, &cfg);

        assert!(!first.end_joint_illegal());
        assert_close(first.b_left().unwrap(), p(4.0, -5.0));
        assert_close(first.b_right().unwrap(), p(6.0, -5.0));
        assert_eq!(first.b_left(), second.a_left());
    }

    #[test]
    fn concentric_arcs_with_different_widths_do_not_join() {
        let cfg = GeometryConfig::default();
        let mut first = Segment::Arc(
            ArcSegment::new(
                p(0.0, 0.0),
                p(5.0, -5.0),
                Some(1.0),
                Paint::default(),
                None,
                None,
                p(0.0, -5.0),
                5.0,
                Angle::new(90.0),
                Heading::new(0.0),
                Heading::new(90.0),
                &cfg,
            )
            .unwrap(),
        );
        let mut second = Segment::Arc(
            ArcSegment::new(
                p(5.0, -5.0),
                p(0.0, -10.0),
                Some(2.0),
                Paint::default(),
                None,
                None,
                p(0.0, -5.0),
                5.0,
                Angle::new(90.0),
                Heading::new(90.0),
                Heading::new(180.0),
                &cfg,
            )
            .unwrap(),
        );
        join_segments(&mut first, &mut second, &cfg);

        assert!(first.end_joint_illegal());
        assert!(second.start_joint_illegal());
        // Default radial caps survive.
        assert_close(first.b_left().unwrap(), p(4.5, -5.0));
        assert_close(second.a_left().unwrap(), p(4.0, -5.0));
    }

    #[test]
    fn widthless_join_is_a_no_op() {
        let cfg = GeometryConfig::default();
        let mut first = Segment::Line(
            LineSegment::new(p(0.0, 0.0), p(1.0, 0.0), None, Paint::default(), None, None, &cfg)
                .unwrap(),
        );
        let mut second = Segment::Line(
            LineSegment::new(p(1.0, 0.0), p(2.0, 1.0), None, Paint::default(), None, None, &cfg)
                .unwrap(),
        );
        join_segments(&mut first, &mut second, &cfg);
        assert!(first.b_left().is_none());
        assert!(!first.end_joint_illegal());
    }
}
