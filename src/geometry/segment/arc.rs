use crate::error::{GeometryError, Result};
use crate::math::angle::{Angle, Heading};
use crate::math::intersect::intersect_circle_line;
use crate::math::points::{closest_point_to, points_equal};
use crate::math::{GeometryConfig, Point};

use super::{endcaps_cross, slant_angle, Paint, SegmentEnd, Side};

/// A circular-arc centerline piece with an optional thickness outline.
///
/// The radius is signed: positive arcs curve left (counter-clockwise
/// on the y-down canvas), negative arcs curve right. The offset curves
/// are concentric circles of radius `radius - w/2` (left) and
/// `radius + w/2` (right); for a right-curving arc the signed
/// arithmetic grows the left offset instead, which is the point of the
/// convention.
#[derive(Debug, Clone)]
pub struct ArcSegment {
    pub(crate) a: Point,
    pub(crate) b: Point,
    pub(crate) width: Option<f64>,
    pub(crate) paint: Paint,
    pub(crate) start_slant: Option<Heading>,
    pub(crate) end_slant: Option<Heading>,
    pub(crate) center: Point,
    pub(crate) radius: f64,
    pub(crate) arc_angle: Angle,
    pub(crate) start_heading: Heading,
    pub(crate) end_heading: Heading,
    pub(crate) a_left: Option<Point>,
    pub(crate) a_right: Option<Point>,
    pub(crate) b_left: Option<Point>,
    pub(crate) b_right: Option<Point>,
    pub(crate) start_joint_illegal: bool,
    pub(crate) end_joint_illegal: bool,
}

impl ArcSegment {
    /// Creates an arc segment and resolves its endcap corners.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoints coincide (within epsilon) or
    /// the radius is zero; the pen filters both out before
    /// construction.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        a: Point,
        b: Point,
        width: Option<f64>,
        paint: Paint,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
        center: Point,
        radius: f64,
        arc_angle: Angle,
        start_heading: Heading,
        end_heading: Heading,
        config: &GeometryConfig,
    ) -> Result<Self> {
        if points_equal(a, b, config.epsilon) {
            return Err(GeometryError::ZeroLengthSegment { x: a.x, y: a.y }.into());
        }
        if radius.abs() <= config.epsilon {
            return Err(GeometryError::ZeroRadius.into());
        }
        let mut segment = Self {
            a,
            b,
            width,
            paint,
            start_slant: None,
            end_slant: None,
            center,
            radius,
            arc_angle,
            start_heading,
            end_heading,
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
    pub fn center(&self) -> Point {
        self.center
    }

    /// Signed radius; positive curves left.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed swept angle; positive sweeps left.
    #[must_use]
    pub fn arc_angle(&self) -> Angle {
        self.arc_angle
    }

    /// Tangent direction at the start, independent of the chord.
    #[must_use]
    pub fn start_heading(&self) -> Heading {
        self.start_heading
    }

    /// Tangent direction at the end, independent of the chord.
    #[must_use]
    pub fn end_heading(&self) -> Heading {
        self.end_heading
    }

    /// Signed radius of the offset circle on the given side.
    pub(crate) fn offset_radius(&self, side: Side) -> f64 {
        let half = self.width.unwrap_or(0.0) / 2.0;
        match side {
            Side::Left => self.radius - half,
            Side::Right => self.radius + half,
        }
    }

    /// Default radial-cut corner, used for unresolved joints.
    pub(crate) fn default_corner(&self, end: SegmentEnd, side: Side) -> Point {
        let endpoint = match end {
            SegmentEnd::Start => self.a,
            SegmentEnd::End => self.b,
        };
        let radial = endpoint - self.center;
        let norm = radial.norm();
        if norm == 0.0 {
            return endpoint;
        }
        self.center + radial * (self.offset_radius(side).abs() / norm)
    }

    /// Recomputes the start corners for a new cut heading by
    /// intersecting the cut line with both offset circles. A cut that
    /// misses either circle flags the joint and leaves its corners
    /// unset.
    pub(crate) fn set_start_slant(&mut self, slant: Option<Heading>, config: &GeometryConfig) {
        self.start_slant = slant;
        if self.width.is_none() {
            return;
        }
        match self.cut_corners(self.a, self.start_heading, slant, config) {
            Some((left, right)) => {
                self.a_left = Some(left);
                self.a_right = Some(right);
                self.check_degenerate(config);
            }
            None => self.start_joint_illegal = true,
        }
    }

    /// Recomputes the end corners for a new cut heading.
    pub(crate) fn set_end_slant(&mut self, slant: Option<Heading>, config: &GeometryConfig) {
        self.end_slant = slant;
        if self.width.is_none() {
            return;
        }
        match self.cut_corners(self.b, self.end_heading, slant, config) {
            Some((left, right)) => {
                self.b_left = Some(left);
                self.b_right = Some(right);
                self.check_degenerate(config);
            }
            None => self.end_joint_illegal = true,
        }
    }

    /// Intersects the cut line through `endpoint` with the two offset
    /// circles, picking the candidates nearest the endpoint.
    fn cut_corners(
        &self,
        endpoint: Point,
        heading: Heading,
        slant: Option<Heading>,
        config: &GeometryConfig,
    ) -> Option<(Point, Point)> {
        let slant = slant_angle(heading, slant);
        let cut = (heading - slant).unit_vector();
        let cut_end = endpoint + cut;

        let hits = intersect_circle_line(
            self.center,
            self.offset_radius(Side::Left),
            endpoint,
            cut_end,
            config.epsilon,
        );
        let left = closest_point_to(endpoint, &hits)?;

        let hits = intersect_circle_line(
            self.center,
            self.offset_radius(Side::Right),
            endpoint,
            cut_end,
            config.epsilon,
        );
        let right = closest_point_to(endpoint, &hits)?;

        Some((left, right))
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
        // Travel flips: the sweep and curvature change sign and the
        // tangents point the other way.
        self.radius = -self.radius;
        self.arc_angle = -self.arc_angle;
        let start = self.start_heading;
        let end = self.end_heading;
        self.start_heading = end + Angle::new(180.0);
        self.end_heading = start + Angle::new(180.0);
    }
}
