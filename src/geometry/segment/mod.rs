pub mod arc;
mod join;
pub mod line;

pub use arc::ArcSegment;
pub use line::LineSegment;

pub(crate) use join::join_segments;

use crate::geometry::sink::{OutlineSink, SinkWalker};
use crate::math::angle::{Angle, Heading};
use crate::math::intersect::intersect_lines;
use crate::math::points::points_equal;
use crate::math::Point;

/// Opaque paint tag carried on every segment.
///
/// The engine never interprets it; it only compares tags for equality
/// when deciding whether a stroke continues and whether line segments
/// may fuse. Mapping tags to actual colors or render modes belongs to
/// the serialization layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paint(pub u32);

/// Which offset side of a segment, looking along the direction of
/// travel (y-down canvas: left of heading 0 is negative y).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Which end of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentEnd {
    Start,
    End,
}

/// One piece of a path's centerline: a straight line or a circular
/// arc, plus the resolved thickness outline at both ends.
///
/// The enum is closed on purpose — joints dispatch over the four
/// (line/arc) × (line/arc) combinations with exhaustive matches.
#[derive(Debug, Clone)]
pub enum Segment {
    Line(LineSegment),
    Arc(ArcSegment),
}

impl Segment {
    #[must_use]
    pub fn a(&self) -> Point {
        match self {
            Segment::Line(s) => s.a,
            Segment::Arc(s) => s.a,
        }
    }

    #[must_use]
    pub fn b(&self) -> Point {
        match self {
            Segment::Line(s) => s.b,
            Segment::Arc(s) => s.b,
        }
    }

    #[must_use]
    pub fn width(&self) -> Option<f64> {
        match self {
            Segment::Line(s) => s.width,
            Segment::Arc(s) => s.width,
        }
    }

    #[must_use]
    pub fn paint(&self) -> Paint {
        match self {
            Segment::Line(s) => s.paint,
            Segment::Arc(s) => s.paint,
        }
    }

    /// Tangent direction at the start of the segment.
    #[must_use]
    pub fn start_heading(&self) -> Heading {
        match self {
            Segment::Line(s) => s.heading(),
            Segment::Arc(s) => s.start_heading,
        }
    }

    /// Tangent direction at the end of the segment.
    #[must_use]
    pub fn end_heading(&self) -> Heading {
        match self {
            Segment::Line(s) => s.heading(),
            Segment::Arc(s) => s.end_heading,
        }
    }

    #[must_use]
    pub fn a_left(&self) -> Option<Point> {
        self.corner(SegmentEnd::Start, Side::Left)
    }

    #[must_use]
    pub fn a_right(&self) -> Option<Point> {
        self.corner(SegmentEnd::Start, Side::Right)
    }

    #[must_use]
    pub fn b_left(&self) -> Option<Point> {
        self.corner(SegmentEnd::End, Side::Left)
    }

    #[must_use]
    pub fn b_right(&self) -> Option<Point> {
        self.corner(SegmentEnd::End, Side::Right)
    }

    #[must_use]
    pub fn start_joint_illegal(&self) -> bool {
        match self {
            Segment::Line(s) => s.start_joint_illegal,
            Segment::Arc(s) => s.start_joint_illegal,
        }
    }

    #[must_use]
    pub fn end_joint_illegal(&self) -> bool {
        match self {
            Segment::Line(s) => s.end_joint_illegal,
            Segment::Arc(s) => s.end_joint_illegal,
        }
    }

    pub(crate) fn corner(&self, end: SegmentEnd, side: Side) -> Option<Point> {
        let (al, ar, bl, br) = match self {
            Segment::Line(s) => (s.a_left, s.a_right, s.b_left, s.b_right),
            Segment::Arc(s) => (s.a_left, s.a_right, s.b_left, s.b_right),
        };
        match (end, side) {
            (SegmentEnd::Start, Side::Left) => al,
            (SegmentEnd::Start, Side::Right) => ar,
            (SegmentEnd::End, Side::Left) => bl,
            (SegmentEnd::End, Side::Right) => br,
        }
    }

    pub(crate) fn set_corner(&mut self, end: SegmentEnd, side: Side, p: Point) {
        let slot = match self {
            Segment::Line(s) => match (end, side) {
                (SegmentEnd::Start, Side::Left) => &mut s.a_left,
                (SegmentEnd::Start, Side::Right) => &mut s.a_right,
                (SegmentEnd::End, Side::Left) => &mut s.b_left,
                (SegmentEnd::End, Side::Right) => &mut s.b_right,
            },
            Segment::Arc(s) => match (end, side) {
                (SegmentEnd::Start, Side::Left) => &mut s.a_left,
                (SegmentEnd::Start, Side::Right) => &mut s.a_right,
                (SegmentEnd::End, Side::Left) => &mut s.b_left,
                (SegmentEnd::End, Side::Right) => &mut s.b_right,
            },
        };
        *slot = Some(p);
    }

    /// Resolved corner, or the default perpendicular/radial corner for
    /// joints that could not be solved (squared-off rendering).
    pub(crate) fn corner_or_default(&self, end: SegmentEnd, side: Side) -> Point {
        self.corner(end, side).unwrap_or_else(|| match self {
            Segment::Line(s) => s.default_corner(end, side),
            Segment::Arc(s) => s.default_corner(end, side),
        })
    }

    pub(crate) fn mark_start_illegal(&mut self) {
        match self {
            Segment::Line(s) => s.start_joint_illegal = true,
            Segment::Arc(s) => s.start_joint_illegal = true,
        }
    }

    pub(crate) fn mark_end_illegal(&mut self) {
        match self {
            Segment::Line(s) => s.end_joint_illegal = true,
            Segment::Arc(s) => s.end_joint_illegal = true,
        }
    }

    /// Flips the direction of travel in place, exchanging endpoints,
    /// corners, slants and joint flags without recomputing geometry.
    pub(crate) fn reverse(&mut self) {
        match self {
            Segment::Line(s) => s.reverse(),
            Segment::Arc(s) => s.reverse(),
        }
    }

    /// Walks this segment's right offset curve, ending at the
    /// right-side end corner.
    pub(crate) fn draw_right<S: OutlineSink + ?Sized>(&self, walker: &mut SinkWalker<'_, S>) {
        let to = self.corner_or_default(SegmentEnd::End, Side::Right);
        match self {
            Segment::Line(_) => walker.line_to(to),
            Segment::Arc(s) => walker.arc_to(to, s.center, s.arc_angle),
        }
    }

    /// Walks this segment's left offset curve backwards, ending at the
    /// left-side start corner.
    pub(crate) fn draw_left<S: OutlineSink + ?Sized>(&self, walker: &mut SinkWalker<'_, S>) {
        let to = self.corner_or_default(SegmentEnd::Start, Side::Left);
        match self {
            Segment::Line(_) => walker.line_to(to),
            Segment::Arc(s) => walker.arc_to(to, s.center, -s.arc_angle),
        }
    }
}

/// Angle between a segment's direction of travel and the cut line at
/// one of its ends, in `[0, 180)`. A missing slant means a
/// perpendicular cut.
pub(crate) fn slant_angle(heading: Heading, slant: Option<Heading>) -> Angle {
    match slant {
        None => Angle::new(90.0),
        Some(s) => (heading - s) % 180.0,
    }
}

/// Whether the two endcap cut segments cross anywhere except a shared
/// corner. Crossing endcaps mean the thickness outline folds over
/// itself; the segment still draws, but both joints are degenerate.
pub(crate) fn endcaps_cross(
    a_left: Point,
    a_right: Point,
    b_left: Point,
    b_right: Point,
    epsilon: f64,
) -> bool {
    let Some(crossing) = intersect_lines(a_left, a_right, b_left, b_right, true, epsilon) else {
        return false;
    };
    let corners = [a_left, a_right, b_left, b_right];
    !corners.iter().any(|&c| points_equal(crossing, c, epsilon))
}
