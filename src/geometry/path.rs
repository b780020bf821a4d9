use crate::error::{RenderError, Result};
use crate::geometry::segment::{join_segments, LineSegment, Segment, SegmentEnd, Side};
use crate::geometry::sink::{OutlineSink, SinkWalker};
use crate::math::points::{collinear, float_equal, points_equal};
use crate::math::{GeometryConfig, Point};

/// An ordered, self-joining chain of segments from one drawing pass.
///
/// Consecutive segments share endpoints (up to epsilon) and their
/// joint corners are resolved as segments are appended. Segments live
/// in a plain arena (`Vec` indexed by position); joins address two
/// slots by index and write into both, so no segment ever aliases
/// another.
#[derive(Debug, Clone, Default)]
pub struct Path {
    segments: Vec<Segment>,
    closed: bool,
}

impl Path {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the path has been closed into a loop.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn start_point(&self) -> Option<Point> {
        self.segments.first().map(Segment::a)
    }

    #[must_use]
    pub fn end_point(&self) -> Option<Point> {
        self.segments.last().map(Segment::b)
    }

    /// Appends a segment, joining it to the previous one. When the new
    /// segment's end meets the path's own start the wrap-around joint
    /// is resolved too and the path becomes a loop.
    pub(crate) fn add_segment(&mut self, segment: Segment, config: &GeometryConfig) {
        self.segments.push(segment);
        let len = self.segments.len();
        if len < 2 {
            return;
        }
        self.join_pair(len - 2, len - 1, config);

        let closes = points_equal(
            self.segments[len - 1].b(),
            self.segments[0].a(),
            config.epsilon,
        );
        if closes {
            self.join_pair(len - 1, 0, config);
            self.closed = true;
        }
    }

    /// Joins the segments in slots `i` and `j`, writing the shared
    /// corners through both slots of the arena.
    fn join_pair(&mut self, i: usize, j: usize, config: &GeometryConfig) {
        debug_assert!(i != j);
        if i < j {
            let (head, tail) = self.segments.split_at_mut(j);
            join_segments(&mut head[i], &mut tail[0], config);
        } else {
            let (head, tail) = self.segments.split_at_mut(i);
            join_segments(&mut tail[0], &mut head[j], config);
        }
    }

    /// Joins the last segment against an external continuation without
    /// taking ownership of it. Used when a paint change forces a new
    /// path that should still look continuous.
    pub(crate) fn join_tail(&mut self, next: &mut Segment, config: &GeometryConfig) {
        if let Some(last) = self.segments.last_mut() {
            join_segments(last, next, config);
        }
    }

    /// Joins an external segment against the first segment, the
    /// paint-change analogue of wrap-around loop closure.
    pub(crate) fn join_head(&mut self, prev: &mut Segment, config: &GeometryConfig) {
        if let Some(first) = self.segments.first_mut() {
            join_segments(prev, first, config);
        }
    }

    /// Closes an open path whose endpoints meet, resolving the
    /// wrap-around joint. Used by canvas stitching.
    pub(crate) fn close_loop(&mut self, config: &GeometryConfig) {
        let len = self.segments.len();
        if self.closed || len < 2 {
            return;
        }
        self.join_pair(len - 1, 0, config);
        self.closed = true;
    }

    /// Reverses the direction of travel. Segment order flips and each
    /// segment swaps its ends, which exactly inverts the outline
    /// without recomputing any geometry.
    pub(crate) fn reverse(&mut self) {
        self.segments.reverse();
        for segment in &mut self.segments {
            segment.reverse();
        }
    }

    /// Splices another path onto this one. The shared endpoint decides
    /// the relative orientation: one or both paths are reversed so
    /// this path's tail meets the other's head, then the seam joint is
    /// resolved and the segment lists are concatenated. Paths without
    /// a shared endpoint are left untouched.
    pub(crate) fn join_with(&mut self, mut other: Path, config: &GeometryConfig) {
        let eps = config.epsilon;
        let (Some(self_start), Some(self_end)) = (self.start_point(), self.end_point()) else {
            *self = other;
            return;
        };
        let (Some(other_start), Some(other_end)) = (other.start_point(), other.end_point()) else {
            return;
        };

        if points_equal(self_end, other_start, eps) {
            // Already tail-to-head.
        } else if points_equal(self_end, other_end, eps) {
            other.reverse();
        } else if points_equal(self_start, other_start, eps) {
            self.reverse();
        } else if points_equal(self_start, other_end, eps) {
            self.reverse();
            other.reverse();
        } else {
            return;
        }

        let seam = self.segments.len();
        self.segments.append(&mut other.segments);
        if seam > 0 && seam < self.segments.len() {
            self.join_pair(seam - 1, seam, config);
        }
    }

    /// Merges runs of collinear line segments that share width and
    /// paint, keeping the outer corners and slants. A pure segment
    /// count optimization: the outline is unchanged, and paths with
    /// nothing fusible are left exactly as they were.
    pub(crate) fn fuse(&mut self, config: &GeometryConfig) {
        let mut fused: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for segment in std::mem::take(&mut self.segments) {
            let merged = match (fused.last(), &segment) {
                (Some(Segment::Line(prev)), Segment::Line(next))
                    if can_fuse(prev, next, config) =>
                {
                    Some(Segment::Line(prev.merged_with(next)))
                }
                _ => None,
            };
            match merged {
                Some(span) => {
                    let last = fused.len() - 1;
                    fused[last] = span;
                }
                None => fused.push(segment),
            }
        }
        self.segments = fused;
    }

    /// Replays the stroke outline boundary into a sink: the start
    /// edge, every right offset curve, the end edge, then every left
    /// offset curve in reverse. Closed loops render as two rings.
    ///
    /// Corners of unsolved joints fall back to perpendicular caps, so
    /// a flagged path still draws, just locally squared-off.
    ///
    /// # Errors
    ///
    /// Returns an error if any segment has no width.
    pub fn draw_outline<S: OutlineSink + ?Sized>(
        &self,
        sink: &mut S,
        config: &GeometryConfig,
    ) -> Result<()> {
        if self.segments.is_empty() {
            return Ok(());
        }
        if self.segments.iter().any(|s| s.width().is_none()) {
            return Err(RenderError::MissingWidth.into());
        }

        let mut walker = SinkWalker::new(sink, config.epsilon);
        let first = &self.segments[0];
        let last = &self.segments[self.segments.len() - 1];

        if self.closed {
            walker.move_to(first.corner_or_default(SegmentEnd::Start, Side::Right));
        } else {
            walker.move_to(first.corner_or_default(SegmentEnd::Start, Side::Left));
            walker.line_to(first.corner_or_default(SegmentEnd::Start, Side::Right));
        }

        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                // Bridges the gap of an unsolved joint; a shared
                // corner makes this a zero-length no-op.
                walker.line_to(segment.corner_or_default(SegmentEnd::Start, Side::Right));
            }
            segment.draw_right(&mut walker);
        }

        if self.closed {
            walker.close_path();
            walker.move_to(last.corner_or_default(SegmentEnd::End, Side::Left));
        } else {
            walker.line_to(last.corner_or_default(SegmentEnd::End, Side::Left));
        }

        for (i, segment) in self.segments.iter().enumerate().rev() {
            if i + 1 < self.segments.len() {
                walker.line_to(segment.corner_or_default(SegmentEnd::End, Side::Left));
            }
            segment.draw_left(&mut walker);
        }
        walker.close_path();
        Ok(())
    }

    /// Replays the bare centerline into a sink, closing it when the
    /// endpoints meet. This is how width-less paths are drawn.
    pub fn draw_centerline<S: OutlineSink + ?Sized>(&self, sink: &mut S, config: &GeometryConfig) {
        let Some(start) = self.start_point() else {
            return;
        };
        let mut walker = SinkWalker::new(sink, config.epsilon);
        walker.move_to(start);
        for segment in &self.segments {
            match segment {
                Segment::Line(line) => walker.line_to(line.b()),
                Segment::Arc(arc) => walker.arc_to(arc.b(), arc.center(), arc.arc_angle()),
            }
        }
        if let Some(end) = self.end_point() {
            if points_equal(end, start, config.epsilon) {
                walker.close_path();
            }
        }
    }
}

fn can_fuse(prev: &LineSegment, next: &LineSegment, config: &GeometryConfig) -> bool {
    let widths_match = match (prev.width(), next.width()) {
        (None, None) => true,
        (Some(a), Some(b)) => float_equal(a, b, config.epsilon),
        _ => false,
    };
    widths_match
        && prev.paint() == next.paint()
        && collinear(&[prev.a(), prev.b(), next.b()], config.epsilon)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::segment::{LineSegment, Paint};
    use crate::geometry::sink::recording::{RecordingSink, SinkOp};
    use crate::math::angle::Heading;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn line_seg(a: Point, b: Point, width: Option<f64>, cfg: &GeometryConfig) -> Segment {
        Segment::Line(
            LineSegment::new(a, b, width, Paint::default(), None, None, cfg).unwrap(),
        )
    }

    fn assert_ops_close(ops: &[SinkOp], expected: &[SinkOp]) {
        assert_eq!(ops.len(), expected.len(), "ops: {ops:?}");
        for (op, want) in ops.iter().zip(expected) {
            match (op, want) {
                (SinkOp::MoveTo(a), SinkOp::MoveTo(b)) | (SinkOp::LineTo(a), SinkOp::LineTo(b)) => {
                    assert!(
                        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
                        "{op:?} != {want:?}"
                    );
                }
                (SinkOp::ClosePath, SinkOp::ClosePath) => {}
                _ => panic!("{op:?} != {want:?}"),
            }
        }
    }

    #[test]
    fn thick_line_outline_rectangle() {
        let cfg = GeometryConfig::default();
        let mut path = Path::new();
        path.add_segment(line_seg(p(0.0, 0.0), p(5.0, 0.0), Some(1.0), &cfg), &cfg);

        let mut sink = RecordingSink::default();
        path.draw_outline(&mut sink, &cfg).unwrap();

        assert_ops_close(
            &sink.ops,
            &[
                SinkOp::MoveTo(p(0.0, -0.5)),
                SinkOp::LineTo(p(0.0, 0.5)),
                SinkOp::LineTo(p(5.0, 0.5)),
                SinkOp::LineTo(p(5.0, -0.5)),
                SinkOp::LineTo(p(0.0, -0.5)),
                SinkOp::ClosePath,
            ],
        );
    }

    #[test]
    fn missing_width_is_a_render_error() {
        let cfg = GeometryConfig::default();
        let mut path = Path::new();
        path.add_segment(line_seg(p(0.0, 0.0), p(1.0, 0.0), None, &cfg), &cfg);

        let mut sink = RecordingSink::default();
        assert!(path.draw_outline(&mut sink, &cfg).is_err());
    }

    #[test]
    fn straight_joint_keeps_shared_corner_in_walk() {
        let cfg = GeometryConfig::default();
        let mut path = Path::new();
        path.add_segment(line_seg(p(0.0, 0.0), p(0.0, 1.0), Some(1.0), &cfg), &cfg);
        path.add_segment(line_seg(p(0.0, 1.0), p(0.0, 2.0), Some(1.0), &cfg), &cfg);

        let mut sink = RecordingSink::default();
        path.draw_outline(&mut sink, &cfg).unwrap();

        // Heading -90 goes toward positive y; its left side is +x.
        assert_ops_close(
            &sink.ops,
            &[
                SinkOp::MoveTo(p(0.5, 0.0)),
                SinkOp::LineTo(p(-0.5, 0.0)),
                SinkOp::LineTo(p(-0.5, 1.0)),
                SinkOp::LineTo(p(-0.5, 2.0)),
                SinkOp::LineTo(p(0.5, 2.0)),
                SinkOp::LineTo(p(0.5, 1.0)),
                SinkOp::LineTo(p(0.5, 0.0)),
                SinkOp::ClosePath,
            ],
        );
    }

    #[test]
    fn turn_back_renders_squared_off_bridges() {
        let cfg = GeometryConfig::default();
        let mut path = Path::new();
        path.add_segment(line_seg(p(0.0, 0.0), p(10.0, 0.0), Some(1.0), &cfg), &cfg);
        path.add_segment(line_seg(p(10.0, 0.0), p(5.0, 0.0), Some(1.0), &cfg), &cfg);

        assert!(path.segments()[0].end_joint_illegal());
        assert!(path.segments()[1].start_joint_illegal());

        let mut sink = RecordingSink::default();
        path.draw_outline(&mut sink, &cfg).unwrap();

        assert_ops_close(
            &sink.ops,
            &[
                SinkOp::MoveTo(p(0.0, -0.5)),
                SinkOp::LineTo(p(0.0, 0.5)),
                SinkOp::LineTo(p(10.0, 0.5)),
                SinkOp::LineTo(p(10.0, -0.5)),
                SinkOp::LineTo(p(5.0, -0.5)),
                SinkOp::LineTo(p(5.0, 0.5)),
                SinkOp::LineTo(p(10.0, 0.5)),
                SinkOp::LineTo(p(10.0, -0.5)),
                SinkOp::LineTo(p(0.0, -0.5)),
                SinkOp::ClosePath,
            ],
        );
    }

    #[test]
    fn zero_length_side_collapses_one_edge() {
        let cfg = GeometryConfig::default();
        let mut path = Path::new();
        let seg = LineSegment::new(
            p(0.0, 0.0),
            p(1.0, 0.0),
            Some(2.0),
            Paint::default(),
            None,
            Some(Heading::new(45.0)),
            &cfg,
        )
        .unwrap();
        path.add_segment(Segment::Line(seg), &cfg);

        let mut sink = RecordingSink::default();
        path.draw_outline(&mut sink, &cfg).unwrap();

        assert_ops_close(
            &sink.ops,
            &[
                SinkOp::MoveTo(p(0.0, -1.0)),
                SinkOp::LineTo(p(0.0, 1.0)),
                SinkOp::LineTo(p(2.0, -1.0)),
                SinkOp::LineTo(p(0.0, -1.0)),
                SinkOp::ClosePath,
            ],
        );
    }

    #[test]
    fn loop_closure_joins_last_to_first() {
        let cfg = GeometryConfig::default();
        let mut path = Path::new();
        path.add_segment(line_seg(p(0.0, 0.0), p(4.0, 0.0), Some(1.0), &cfg), &cfg);
        path.add_segment(line_seg(p(4.0, 0.0), p(4.0, 4.0), Some(1.0), &cfg), &cfg);
        path.add_segment(line_seg(p(4.0, 4.0), p(0.0, 4.0), Some(1.0), &cfg), &cfg);
        assert!(!path.is_closed());
        path.add_segment(line_seg(p(0.0, 4.0), p(0.0, 0.0), Some(1.0), &cfg), &cfg);
        assert!(path.is_closed());

        // The wrap-around joint resolved both sides.
        let first = &path.segments()[0];
        let last = &path.segments()[3];
        assert_eq!(last.b_left(), first.a_left());
        assert_eq!(last.b_right(), first.a_right());
    }

    #[test]
    fn closed_loop_renders_two_rings() {
        let cfg = GeometryConfig::default();
        let mut path = Path::new();
        path.add_segment(line_seg(p(0.0, 0.0), p(4.0, 0.0), Some(1.0), &cfg), &cfg);
        path.add_segment(line_seg(p(4.0, 0.0), p(4.0, 4.0), Some(1.0), &cfg), &cfg);
        path.add_segment(line_seg(p(4.0, 4.0), p(0.0, 4.0), Some(1.0), &cfg), &cfg);
        path.add_segment(line_seg(p(0.0, 4.0), p(0.0, 0.0), Some(1.0), &cfg), &cfg);

        let mut sink = RecordingSink::default();
        path.draw_outline(&mut sink, &cfg).unwrap();

        let closes = sink
            .ops
            .iter()
            .filter(|op| matches!(op, SinkOp::ClosePath))
            .count();
        assert_eq!(closes, 2, "a loop renders as two rings: {:?}", sink.ops);
        let moves = sink
            .ops
            .iter()
            .filter(|op| matches!(op, SinkOp::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
    }

    #[test]
    fn reverse_inverts_endpoints() {
        let cfg = GeometryConfig::default();
        let mut path = Path::new();
        path.add_segment(line_seg(p(0.0, 0.0), p(1.0, 0.0), Some(1.0), &cfg), &cfg);
        path.add_segment(line_seg(p(1.0, 0.0), p(1.0, 2.0), Some(1.0), &cfg), &cfg);
        path.reverse();

        assert_eq!(path.start_point().unwrap(), p(1.0, 2.0));
        assert_eq!(path.end_point().unwrap(), p(0.0, 0.0));
        assert_eq!(path.segments()[0].b(), p(1.0, 0.0));
    }

    #[test]
    fn fuse_merges_collinear_runs() {
        let cfg = GeometryConfig::default();
        let mut path = Path::new();
        path.add_segment(line_seg(p(0.0, 0.0), p(1.0, 1.0), Some(1.0), &cfg), &cfg);
        path.add_segment(line_seg(p(1.0, 1.0), p(2.0, 2.0), Some(1.0), &cfg), &cfg);
        path.add_segment(line_seg(p(2.0, 2.0), p(3.0, 3.0), Some(1.0), &cfg), &cfg);
        path.add_segment(line_seg(p(3.0, 3.0), p(3.0, 5.0), Some(1.0), &cfg), &cfg);

        let outer_start = path.segments()[0].a_left();
        let outer_end = path.segments()[3].b_right();
        path.fuse(&cfg);

        assert_eq!(path.segments().len(), 2);
        assert_eq!(path.segments()[0].a(), p(0.0, 0.0));
        assert_eq!(path.segments()[0].b(), p(3.0, 3.0));
        // Outer corners survive the merge.
        assert_eq!(path.segments()[0].a_left(), outer_start);
        assert_eq!(path.segments()[1].b_right(), outer_end);
    }

    #[test]
    fn fuse_is_idempotent_when_nothing_matches() {
        let cfg = GeometryConfig::default();
        let mut path = Path::new();
        // Not collinear.
        path.add_segment(line_seg(p(0.0, 0.0), p(1.0, 0.0), Some(1.0), &cfg), &cfg);
        path.add_segment(line_seg(p(1.0, 0.0), p(1.0, 1.0), Some(1.0), &cfg), &cfg);
        // Collinear but different width.
        path.add_segment(line_seg(p(1.0, 1.0), p(1.0, 2.0), Some(2.0), &cfg), &cfg);

        let endpoints: Vec<(Point, Point)> =
            path.segments().iter().map(|s| (s.a(), s.b())).collect();
        path.fuse(&cfg);
        let after: Vec<(Point, Point)> = path.segments().iter().map(|s| (s.a(), s.b())).collect();
        assert_eq!(endpoints, after);
    }

    #[test]
    fn join_with_resolves_orientation() {
        let cfg = GeometryConfig::default();

        // This start meets the other end: both sides reverse.
        let mut left = Path::new();
        left.add_segment(line_seg(p(1.0, 0.0), p(0.0, 0.0), None, &cfg), &cfg);
        let mut right = Path::new();
        right.add_segment(line_seg(p(2.0, 0.0), p(1.0, 0.0), None, &cfg), &cfg);
        left.join_with(right, &cfg);
        assert_eq!(left.segments().len(), 2);
        let points: Vec<Point> = std::iter::once(left.start_point().unwrap())
            .chain(left.segments().iter().map(Segment::b))
            .collect();
        assert_eq!(points, vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]);
    }

    #[test]
    fn centerline_walk_closes_loops() {
        let cfg = GeometryConfig::default();
        let mut path = Path::new();
        path.add_segment(line_seg(p(0.0, 0.0), p(1.0, 0.0), None, &cfg), &cfg);
        path.add_segment(line_seg(p(1.0, 0.0), p(1.0, 1.0), None, &cfg), &cfg);
        path.add_segment(line_seg(p(1.0, 1.0), p(0.0, 0.0), None, &cfg), &cfg);

        let mut sink = RecordingSink::default();
        path.draw_centerline(&mut sink, &cfg);
        assert_eq!(
            sink.ops,
            vec![
                SinkOp::MoveTo(p(0.0, 0.0)),
                SinkOp::LineTo(p(1.0, 0.0)),
                SinkOp::LineTo(p(1.0, 1.0)),
                SinkOp::LineTo(p(0.0, 0.0)),
                SinkOp::ClosePath,
            ]
        );
    }
}
