use crate::math::angle::Angle;
use crate::math::points::points_equal;
use crate::math::Point;

/// Receiver for boundary walks — the seam between the geometry engine
/// and whatever serializes or rasterizes the result.
///
/// A sink only ever sees four operations: start a subpath, draw a
/// straight edge, draw a circular-arc edge (center and signed sweep
/// angle given, radius implied), and close the current subpath.
/// Everything else — number formatting, fill rules, compositing — is
/// the collaborator's business.
pub trait OutlineSink {
    fn move_to(&mut self, p: Point);

    fn line_to(&mut self, p: Point);

    /// Draw a circular arc from the current position to `p` around
    /// `center`. A positive `arc_angle` sweeps to the left
    /// (counter-clockwise on the y-down canvas).
    fn arc_to(&mut self, p: Point, center: Point, arc_angle: Angle);

    fn close_path(&mut self);
}

/// Wraps a sink during a boundary walk, dropping zero-length line
/// emissions so that shared joint corners render seamlessly while
/// unresolved joints get their squared-off bridge edges.
pub(crate) struct SinkWalker<'a, S: OutlineSink + ?Sized> {
    sink: &'a mut S,
    position: Option<Point>,
    epsilon: f64,
}

impl<'a, S: OutlineSink + ?Sized> SinkWalker<'a, S> {
    pub(crate) fn new(sink: &'a mut S, epsilon: f64) -> Self {
        Self {
            sink,
            position: None,
            epsilon,
        }
    }

    pub(crate) fn move_to(&mut self, p: Point) {
        self.position = Some(p);
        self.sink.move_to(p);
    }

    pub(crate) fn line_to(&mut self, p: Point) {
        if let Some(current) = self.position {
            if points_equal(current, p, self.epsilon) {
                return;
            }
        }
        self.position = Some(p);
        self.sink.line_to(p);
    }

    pub(crate) fn arc_to(&mut self, p: Point, center: Point, arc_angle: Angle) {
        self.position = Some(p);
        self.sink.arc_to(p, center, arc_angle);
    }

    pub(crate) fn close_path(&mut self) {
        self.position = None;
        self.sink.close_path();
    }
}
