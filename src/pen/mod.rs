mod command;

pub use command::PenCommand;

use crate::error::{GeometryError, Result};
use crate::geometry::path::Path;
use crate::geometry::segment::{ArcSegment, LineSegment, Paint, Segment};
use crate::math::angle::{Angle, Heading};
use crate::math::intersect::intersect_lines;
use crate::math::points::points_equal;
use crate::math::{GeometryConfig, Point, Vector};
use crate::paper::{Paper, PathKey};

/// The imperative turtle that drives the geometry engine.
///
/// A pen has a position, a heading, and an active drawing mode (stroke
/// width plus paint tag). Movement commands relocate it, drawing
/// commands emit segments onto the paper, continuing the current path
/// whenever the geometry chains and the mode is compatible.
#[derive(Debug)]
pub struct Pen {
    paper: Paper,
    position: Point,
    heading: Heading,
    width: Option<f64>,
    paint: Paint,
    current: Option<PathKey>,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            paper: Paper::new(),
            position: Point::origin(),
            heading: Heading::new(0.0),
            width: None,
            paint: Paint::default(),
            current: None,
        }
    }
}

impl Pen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: GeometryConfig) -> Self {
        Self {
            paper: Paper::with_config(config),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn paper(&self) -> &Paper {
        &self.paper
    }

    pub fn paper_mut(&mut self) -> &mut Paper {
        &mut self.paper
    }

    #[must_use]
    pub fn into_paper(self) -> Paper {
        self.paper
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    #[must_use]
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    #[must_use]
    pub fn paint(&self) -> Paint {
        self.paint
    }

    /// Sets the stroke width for subsequent drawing commands.
    pub fn set_width(&mut self, width: f64) {
        self.width = Some(width);
    }

    /// Switches to centerline-only drawing (no thickness).
    pub fn clear_width(&mut self) {
        self.width = None;
    }

    pub fn set_paint(&mut self, paint: Paint) {
        self.paint = paint;
    }

    /// The most recently started path, if any.
    #[must_use]
    pub fn last_path(&self) -> Option<&Path> {
        self.paper.paths().last()
    }

    /// The most recently emitted segment, if any.
    #[must_use]
    pub fn last_segment(&self) -> Option<&Segment> {
        self.last_path().and_then(|path| path.segments().last())
    }

    // Movement.

    pub fn move_to(&mut self, to: Point) {
        self.position = to;
    }

    pub fn move_forward(&mut self, distance: f64) {
        self.position += self.heading.unit_vector() * distance;
    }

    /// Moves along the current heading until the x coordinate reaches
    /// `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the heading runs parallel to the y-axis.
    pub fn move_to_x(&mut self, x: f64) -> Result<()> {
        self.position = self.forward_to_x(x)?;
        Ok(())
    }

    /// Moves along the current heading until the y coordinate reaches
    /// `y`.
    ///
    /// # Errors
    ///
    /// Returns an error if the heading runs parallel to the x-axis.
    pub fn move_to_y(&mut self, y: f64) -> Result<()> {
        self.position = self.forward_to_y(y)?;
        Ok(())
    }

    /// Ends the current path; the next drawing command starts a new
    /// one even if it continues from the same spot.
    pub fn break_stroke(&mut self) {
        self.current = None;
    }

    // Turning.

    pub fn turn_to(&mut self, heading: Heading) {
        self.heading = heading;
    }

    pub fn turn_left(&mut self, angle: Angle) {
        self.heading = self.heading + angle;
    }

    pub fn turn_right(&mut self, angle: Angle) {
        self.turn_left(-angle);
    }

    /// Turns toward a target point; staying put if the target is the
    /// current position.
    pub fn turn_toward(&mut self, target: Point) {
        if let Some(heading) = Heading::of_vector(target - self.position) {
            self.heading = heading;
        }
    }

    // Lines.

    pub fn line_to(&mut self, to: Point) {
        self.line_to_with(to, None, None);
    }

    /// Draws a straight segment to `to` with explicit end cuts.
    /// Zero-length emissions are dropped silently.
    pub fn line_to_with(
        &mut self,
        to: Point,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    ) {
        let from = self.position;
        self.position = to;
        let config = *self.paper.config();
        if points_equal(from, to, config.epsilon) {
            return;
        }
        let Ok(segment) = LineSegment::new(
            from,
            to,
            self.width,
            self.paint,
            start_slant,
            end_slant,
            &config,
        ) else {
            return;
        };
        self.add_segment(Segment::Line(segment), &config);
    }

    pub fn line_forward(&mut self, distance: f64) {
        self.line_forward_with(distance, None, None);
    }

    pub fn line_forward_with(
        &mut self,
        distance: f64,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    ) {
        let to = self.position + self.heading.unit_vector() * distance;
        self.line_to_with(to, start_slant, end_slant);
    }

    /// Draws forward until the x coordinate reaches `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the heading runs parallel to the y-axis.
    pub fn line_to_x(&mut self, x: f64) -> Result<()> {
        self.line_to_x_with(x, None, None)
    }

    /// # Errors
    ///
    /// Returns an error if the heading runs parallel to the y-axis.
    pub fn line_to_x_with(
        &mut self,
        x: f64,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    ) -> Result<()> {
        let to = self.forward_to_x(x)?;
        self.line_to_with(to, start_slant, end_slant);
        Ok(())
    }

    /// Draws forward until the y coordinate reaches `y`.
    ///
    /// # Errors
    ///
    /// Returns an error if the heading runs parallel to the x-axis.
    pub fn line_to_y(&mut self, y: f64) -> Result<()> {
        self.line_to_y_with(y, None, None)
    }

    /// # Errors
    ///
    /// Returns an error if the heading runs parallel to the x-axis.
    pub fn line_to_y_with(
        &mut self,
        y: f64,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    ) -> Result<()> {
        let to = self.forward_to_y(y)?;
        self.line_to_with(to, start_slant, end_slant);
        Ok(())
    }

    // Arcs.

    /// Arcs to the left through `angle` with the given radius. A
    /// negative angle arcs to the right; zero-radius and full-circle
    /// arcs are dropped silently.
    pub fn arc_left(&mut self, angle: Angle, radius: f64) {
        self.arc_left_with(angle, radius, None, None);
    }

    pub fn arc_left_with(
        &mut self,
        angle: Angle,
        radius: f64,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    ) {
        let radius = if angle.degrees() < 0.0 {
            -radius.abs()
        } else {
            radius
        };
        let center = self.position + (self.heading + Angle::new(90.0)).unit_vector() * radius;
        let endpoint = center + angle.rotate(self.position - center);
        self.emit_arc(center, radius, endpoint, angle, start_slant, end_slant);
    }

    pub fn arc_right(&mut self, angle: Angle, radius: f64) {
        self.arc_left(-angle, radius);
    }

    pub fn arc_right_with(
        &mut self,
        angle: Angle,
        radius: f64,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    ) {
        self.arc_left_with(-angle, radius, start_slant, end_slant);
    }

    /// Arcs to the left through `angle` around an explicit center.
    pub fn arc_left_about(&mut self, angle: Angle, center: Point) {
        self.arc_left_about_with(angle, center, None, None);
    }

    pub fn arc_left_about_with(
        &mut self,
        angle: Angle,
        center: Point,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    ) {
        let v_radius = self.position - center;
        let radius = if angle.degrees() < 0.0 {
            -v_radius.norm()
        } else {
            v_radius.norm()
        };
        let endpoint = center + angle.rotate(v_radius);
        self.emit_arc(center, radius, endpoint, angle, start_slant, end_slant);
    }

    pub fn arc_right_about(&mut self, angle: Angle, center: Point) {
        self.arc_left_about(-angle, center);
    }

    pub fn arc_right_about_with(
        &mut self,
        angle: Angle,
        center: Point,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    ) {
        self.arc_left_about_with(-angle, center, start_slant, end_slant);
    }

    /// Arcs to `to`, starting tangent to the current heading. The arc
    /// center is derived by intersecting the heading perpendicular
    /// with the chord bisector.
    ///
    /// # Errors
    ///
    /// Returns an error if the target lies along the current heading
    /// (no tangent circle exists).
    pub fn arc_to(&mut self, to: Point) -> Result<()> {
        self.arc_to_with(to, None, None)
    }

    /// # Errors
    ///
    /// Returns an error if the target lies along the current heading.
    pub fn arc_to_with(
        &mut self,
        to: Point,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    ) -> Result<()> {
        let config = *self.paper.config();
        if points_equal(self.position, to, config.epsilon) {
            return Ok(());
        }
        let perpendicular = (self.heading + Angle::new(90.0)).unit_vector();
        let chord = to - self.position;
        let midpoint = self.position + chord / 2.0;
        let bisector = Angle::new(90.0).rotate(chord);
        let center = intersect_lines(
            self.position,
            self.position + perpendicular,
            midpoint,
            midpoint + bisector,
            false,
            config.epsilon,
        )
        .ok_or_else(|| {
            GeometryError::Degenerate("arc target lies along the current heading".into())
        })?;
        self.arc_to_about_with(to, center, start_slant, end_slant)
    }

    /// Arcs to `to` around an explicit center, trusting the caller's
    /// geometry the way a drawing tool must.
    ///
    /// # Errors
    ///
    /// Returns an error if the center coincides with the current
    /// position.
    pub fn arc_to_about(&mut self, to: Point, center: Point) -> Result<()> {
        self.arc_to_about_with(to, center, None, None)
    }

    /// # Errors
    ///
    /// Returns an error if the center coincides with the current
    /// position.
    pub fn arc_to_about_with(
        &mut self,
        to: Point,
        center: Point,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    ) -> Result<()> {
        let config = *self.paper.config();
        if points_equal(self.position, to, config.epsilon) {
            return Ok(());
        }

        // The true start heading is tangent to the circle through the
        // current position; it may differ slightly from the pen
        // heading, so the pen snaps to it.
        let v_radius = self.position - center;
        let mut tangent = Angle::new(90.0).rotate(v_radius);
        if tangent.dot(&self.heading.unit_vector()) < 0.0 {
            tangent = -tangent;
        }
        let start_heading =
            Heading::of_vector(tangent).ok_or(GeometryError::ZeroVector)?;
        self.heading = start_heading;

        // The swept angle is twice the angle between the tangent and
        // the chord; the side of the chord decides left or right.
        let chord = to - self.position;
        let pen = self.heading.unit_vector();
        let left = (self.heading + Angle::new(90.0)).unit_vector();
        let cos = (pen.dot(&chord) / chord.norm()).clamp(-1.0, 1.0);
        let mut arc_angle = Angle::from_radians(2.0 * cos.acos());
        let mut radius = v_radius.norm();
        if chord.dot(&left) < 0.0 {
            arc_angle = -arc_angle;
            radius = -radius;
        }

        self.emit_arc(center, radius, to, arc_angle, start_slant, end_slant);
        Ok(())
    }

    // Internal.

    /// Commits an arc: the pen moves and turns even when the segment
    /// itself is dropped as zero-length.
    fn emit_arc(
        &mut self,
        center: Point,
        radius: f64,
        endpoint: Point,
        arc_angle: Angle,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    ) {
        let config = *self.paper.config();
        let from = self.position;
        let start_heading = self.heading;
        self.position = endpoint;
        self.heading = self.heading + arc_angle;

        if points_equal(from, endpoint, config.epsilon) {
            return;
        }
        let Ok(segment) = ArcSegment::new(
            from,
            endpoint,
            self.width,
            self.paint,
            start_slant,
            end_slant,
            center,
            radius,
            arc_angle,
            start_heading,
            self.heading,
            &config,
        ) else {
            return;
        };
        self.add_segment(Segment::Arc(segment), &config);
    }

    /// Decides whether a fresh segment continues the current path,
    /// starts a new one, or starts a new one that still joins the old
    /// seam (paint changes).
    fn add_segment(&mut self, mut segment: Segment, config: &GeometryConfig) {
        let current = self.current.filter(|&key| self.paper.contains(key));
        let Some(key) = current else {
            self.start_new_path(segment);
            return;
        };

        let (chains, class_same, paint_same, closes) = {
            let Some(path) = self.paper.path(key) else {
                self.start_new_path(segment);
                return;
            };
            let segments = path.segments();
            let last = &segments[segments.len() - 1];
            (
                points_equal(last.b(), segment.a(), config.epsilon),
                last.width().is_some() == segment.width().is_some(),
                last.paint() == segment.paint(),
                points_equal(segment.b(), segments[0].a(), config.epsilon),
            )
        };

        if !chains || !class_same {
            self.start_new_path(segment);
            return;
        }

        if paint_same {
            if let Some(path) = self.paper.path_mut(key) {
                path.add_segment(segment, config);
            }
            return;
        }

        // The stroke continues visually under a new paint: the seam
        // corners still join, but the segment opens a new path.
        if let Some(path) = self.paper.path_mut(key) {
            path.join_tail(&mut segment, config);
            if closes {
                path.join_head(&mut segment, config);
            }
        }
        self.start_new_path(segment);
    }

    fn start_new_path(&mut self, segment: Segment) {
        let config = *self.paper.config();
        let mut path = Path::new();
        path.add_segment(segment, &config);
        let key = self.paper.insert_path(path);
        self.current = Some(key);
    }

    fn forward_to_x(&self, x: f64) -> Result<Point> {
        let direction: Vector = self.heading.unit_vector();
        if direction.x.abs() <= self.paper.config().epsilon {
            return Err(GeometryError::UnreachableTarget {
                axis: "x",
                target: x,
                heading: self.heading.degrees(),
            }
            .into());
        }
        let t = (x - self.position.x) / direction.x;
        Ok(self.position + direction * t)
    }

    fn forward_to_y(&self, y: f64) -> Result<Point> {
        let direction: Vector = self.heading.unit_vector();
        if direction.y.abs() <= self.paper.config().epsilon {
            return Err(GeometryError::UnreachableTarget {
                axis: "y",
                target: y,
                heading: self.heading.degrees(),
            }
            .into());
        }
        let t = (y - self.position.y) / direction.y;
        Ok(self.position + direction * t)
    }
}
