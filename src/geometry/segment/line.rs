use crate::error::{GeometryError, Result};
use crate::math::angle::{Angle, Heading};
use crate::math::points::points_equal;
use crate::math::{GeometryConfig, Point, Vector};

use super::{endcaps_cross, slant_angle, Paint, SegmentEnd, Side};

/// Cut lines closer than this to the segment direction (in degrees)
/// cannot produce a usable endcap.
const MIN_SLANT_ANGLE: f64 = 1.0;

/// A straight centerline piece with an optional thickness outline.
///
/// Corner points are resolved from the end slants at construction and
/// rewritten when a neighboring segment joins on; unresolved corners
/// stay unset and the affected joint is flagged instead.
#[derive(Debug, Clone)]
pub struct LineSegment {
    pub(crate) a: Point,
    pub(crate) b: Point,
    pub(crate) width: Option<f64>,
    pub(crate) paint: Paint,
    pub(crate) start_slant: Option<Heading>,
    pub(crate) end_slant: Option<Heading>,
    pub(crate) a_left: Option<Point>,
    pub(crate) a_right: Option<Point>,
    pub(crate) b_left: Option<Point>,
    pub(crate) b_right: Option<Point>,
    pub(crate) start_joint_illegal: bool,
    pub(crate) end_joint_illegal: bool,
}

impl LineSegment {
    /// Creates a line segment and resolves its endcap corners.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoints coincide (within epsilon);
    /// zero-length segments must be filtered out before construction.
    pub fn new(
        a: Point,
        b: Point,
        width: Option<f64>,
        paint: Paint,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
        config: &GeometryConfig,
    ) -> Result<Self> {
        if points_equal(a, b, config.epsilon) {
            return Err(GeometryError::ZeroLengthSegment { x: a.x, y: a.y }.into());
        }
        let mut segment = Self {
            a,
            b,
            width,
            paint,
            start_slant: None,
            end_slant: None,
            a_left: None,
            a_right: None,
            b_left: None,
            b_right: None,
            start_joint_illegal: false,
            end_joint_illegal: false,
        };
        segment.set_start_slant(start_slant, config);
        segment.set_end_slant(end_slant, config);
        Ok(segment)
    }

    #[must_use]
    pub fn a(&self) -> Point {
        self.a
    }

    #[must_use]
    pub fn b(&self) -> Point {
        self.b
    }

    #[must_use]
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    #[must_use]
    pub fn paint(&self) -> Paint {
        self.paint
    }

    #[must_use]
    pub fn start_slant(&self) -> Option<Heading> {
        self.start_slant
    }

    #[must_use]
    pub fn end_slant(&self) -> Option<Heading> {
        self.end_slant
    }

    /// Direction of travel. Lines share one heading for both ends.
    #[must_use]
    pub fn heading(&self) -> Heading {
        Heading::of_vector(self.b - self.a).unwrap_or_else(|| Heading::new(0.0))
    }

    /// Half-width vector pointing to the left offset line.
    pub(crate) fn width_vector(&self) -> Vector {
        let half = self.width.unwrap_or(0.0) / 2.0;
        (self.heading() + Angle::new(90.0)).unit_vector() * half
    }

    /// The centerline displaced by half the width to the given side.
    pub(crate) fn offset_line(&self, side: Side) -> (Point, Point) {
        let w = match side {
            Side::Left => self.width_vector(),
            Side::Right => -self.width_vector(),
        };
        (self.a + w, self.b + w)
    }

    /// Default perpendicular-cut corner, used for unresolved joints.
    pub(crate) fn default_corner(&self, end: SegmentEnd, side: Side) -> Point {
        let endpoint = match end {
            SegmentEnd::Start => self.a,
            SegmentEnd::End => self.b,
        };
        match side {
            Side::Left => endpoint + self.width_vector(),
            Side::Right => endpoint - self.width_vector(),
        }
    }

    /// Recomputes the start corners for a new cut heading. A cut
    /// within [`MIN_SLANT_ANGLE`] of the direction of travel is
    /// unsolvable: the joint is flagged and the corners stay unset.
    pub(crate) fn set_start_slant(&mut self, slant: Option<Heading>, config: &GeometryConfig) {
        self.start_slant = slant;
        let Some(v) = self.slant_vector(slant) else {
            if self.width.is_some() {
                self.start_joint_illegal = true;
            }
            return;
        };
        self.a_left = Some(self.a - v);
        self.a_right = Some(self.a + v);
        self.check_degenerate(config);
    }

    /// Recomputes the end corners for a new cut heading.
    pub(crate) fn set_end_slant(&mut self, slant: Option<Heading>, config: &GeometryConfig) {
        self.end_slant = slant;
        let Some(v) = self.slant_vector(slant) else {
            if self.width.is_some() {
                self.end_joint_illegal = true;
            }
            return;
        };
        self.b_left = Some(self.b - v);
        self.b_right = Some(self.b + v);
        self.check_degenerate(config);
    }

    /// Half of the cut segment: from an endpoint toward its right
    /// corner. The cut is longer than the stroke width when slanted,
    /// by `1 / sin(slant)`.
    fn slant_vector(&self, slant: Option<Heading>) -> Option<Vector> {
        let width = self.width?;
        let heading = self.heading();
        let slant = slant_angle(heading, slant);
        let degrees = slant.degrees();
        if degrees < MIN_SLANT_ANGLE || degrees > 180.0 - MIN_SLANT_ANGLE {
            return None;
        }
        let slant_width = width / slant.to_radians().sin();
        Some((heading - slant).unit_vector() * (slant_width / 2.0))
    }

    pub(crate) fn check_degenerate(&mut self, config: &GeometryConfig) {
        let (Some(al), Some(ar), Some(bl), Some(br)) =
            (self.a_left, self.a_right, self.b_left, self.b_right)
        else {
            return;
        };
        if endcaps_cross(al, ar, bl, br, config.epsilon) {
            self.start_joint_illegal = true;
            self.end_joint_illegal = true;
        }
    }

    pub(crate) fn reverse(&mut self) {
        std::mem::swap(&mut self.a, &mut self.b);
        std::mem::swap(&mut self.a_left, &mut self.b_right);
        std::mem::swap(&mut self.a_right, &mut self.b_left);
        std::mem::swap(&mut self.start_slant, &mut self.end_slant);
        std::mem::swap(&mut self.start_joint_illegal, &mut self.end_joint_illegal);
    }

    /// The fused span over this segment and a collinear continuation,
    /// keeping the outer corners, slants and joint flags.
    pub(crate) fn merged_with(&self, next: &LineSegment) -> LineSegment {
        LineSegment {
            a: self.a,
            b: next.b,
            width: self.width,
            paint: self.paint,
            start_slant: self.start_slant,
            end_slant: next.end_slant,
            a_left: self.a_left,
            a_right: self.a_right,
            b_left: next.b_left,
            b_right: next.b_right,
            start_joint_illegal: self.start_joint_illegal,
            end_joint_illegal: next.end_joint_illegal,
        }
    }
}
